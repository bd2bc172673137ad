use specdoc::Heading;

/// Render the table of contents for `headings`.
///
/// Level-1 headings are left out: the document title is the only one and
/// linking to it is pointless. Each remaining level is indented two spaces
/// per step below level 2.
pub fn generate_toc(headings: &[Heading], title: &str) -> String {
    let mut toc = format!("# {}\n\n", title);
    for heading in headings.iter().filter(|h| h.level > 1) {
        let indent = "  ".repeat(usize::from(heading.level - 2));
        toc.push_str(&format!(
            "{}- [{}](#{})\n",
            indent,
            heading.title,
            heading.anchor()
        ));
    }
    toc
}

/// Place `toc` after the first two lines of `text`.
///
/// Those lines are taken to be the title and the line after it. Documents
/// with fewer than three lines are returned unchanged.
pub fn insert_toc(text: &str, toc: &str) -> String {
    let parts: Vec<&str> = text.splitn(4, '\n').collect();
    if parts.len() < 3 {
        return text.to_string();
    }
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        parts[0],
        parts[1],
        toc,
        parts[2..].join("\n")
    )
}
