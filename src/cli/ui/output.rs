use console::style;

/// Terminal formatting for command reports
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    /// Error report for stderr; colored only when stderr is a terminal
    pub fn error_line(message: &str) -> String {
        format!("{} {}", style("Error:").for_stderr().red(), message)
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", Self::error_line(message));
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// `label: ✓ value` or `label: ✗ value`
    pub fn check(&self, label: &str, ok: bool, value: &str) {
        let mark = if ok {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {:<10} {} {}", format!("{}:", label), mark, value);
    }

    pub fn item(&self, index: usize, name: &str, detail: &str) {
        if detail.is_empty() {
            println!("  {:>2}. {}", index, name);
        } else {
            println!("  {:>2}. {} {}", index, name, style(detail).dim());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
