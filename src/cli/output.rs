//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✗".red(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for trees and documents)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a rendered tree; `termtree` output already ends in a newline.
pub fn tree(rendered: &(impl std::fmt::Display + ?Sized)) {
    print!("{}", tree_text(rendered));
}

fn tree_text(rendered: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("{}\n", rendered.to_string().trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termtree::Tree;

    #[test]
    fn test_tree_text_ends_in_single_newline() {
        let mut rendered = Tree::new("CEO".to_string());
        rendered.push(Tree::new("CTO".to_string()));
        assert_eq!(tree_text(&rendered), "CEO\n└── CTO\n");
        assert_eq!(tree_text("leaf"), "leaf\n");
    }
}
