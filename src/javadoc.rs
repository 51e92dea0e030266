//! Small readers over the free-text documentation attached to model members.
//!
//! Documentation arrives as plain text: a description followed by block
//! tags (`@param name ...`, `@return ...`), one tag per line start.

/// Description part: everything before the first block tag, whitespace-collapsed
pub fn description(doc: &str) -> String {
    let lines: Vec<&str> = doc
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with('@'))
        .collect();
    collapse(&lines.join(" "))
}

/// Text of the `@return` tag, if any
pub fn return_text(doc: &str) -> Option<String> {
    block_tag(doc, "@return", None)
}

/// Text of the `@param` tag for one parameter, if any
pub fn param_text(doc: &str, name: &str) -> Option<String> {
    block_tag(doc, "@param", Some(name))
}

fn block_tag(doc: &str, tag: &str, argument: Option<&str>) -> Option<String> {
    let mut collected: Option<Vec<&str>> = None;
    for line in doc.lines().map(str::trim) {
        if line.starts_with('@') {
            if collected.is_some() {
                break;
            }
            let Some(rest) = line.strip_prefix(tag) else {
                continue;
            };
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let rest = rest.trim_start();
            match argument {
                Some(name) => {
                    let mut parts = rest.splitn(2, char::is_whitespace);
                    if parts.next() == Some(name) {
                        collected = Some(vec![parts.next().unwrap_or("")]);
                    }
                }
                None => collected = Some(vec![rest]),
            }
        } else if let Some(lines) = collected.as_mut() {
            lines.push(line);
        }
    }
    collected.map(|lines| collapse(&lines.join(" ")))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
