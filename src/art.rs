pub fn welcome_message(title: &str) -> String {
    let width = title.len() + 8;
    let border = "═".repeat(width);
    format!(
        "╔{border}╗\n║    {title}    ║\n╚{border}╝\nEnter \".exit\" to quit, \".constants\" or \".btree\" to inspect the store."
    )
}
