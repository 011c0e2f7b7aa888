//! Tree-shaped debug printing.

/// Child printer callback used by [`print_binary`]. Receives the tab prefix for
/// the child's own children.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders up to two children under a node line, `←` for the left child and
/// `→` for the right one, each indented by `tab` plus two spaces.
pub fn print_binary(tab: &str, children: [Option<&PrintChild<'_>>; 2]) -> String {
    let [left, right] = children;

    let mut out = String::new();
    if let Some(left) = left {
        let left_tab = format!("{tab}  ");
        out.push('\n');
        out.push_str(tab);
        out.push_str("← ");
        out.push_str(&left(&left_tab));
    }
    if let Some(right) = right {
        let right_tab = format!("{tab}  ");
        out.push('\n');
        out.push_str(tab);
        out.push_str("→ ");
        out.push_str(&right(&right_tab));
    }

    out
}
