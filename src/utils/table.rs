use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

/// Rounded box with no inner rules, for tables without a header row
pub fn framed(mut table: Table) -> Table {
    table.with(Style::rounded().remove_horizontals());
    table
}

/// Rounded box with a rule under the header row
pub fn rounded(mut table: Table) -> Table {
    table.with(Style::rounded());
    table
}

/// Render `table` with `title` centred above it in bold
pub fn titled(title: &str, table: &Table) -> String {
    let body = table.to_string();
    let width = body.lines().next().map(|l| l.chars().count()).unwrap_or(0);
    let heading = format!("{:^width$}", title, width = width);
    format!("{}\n{}", heading.trim_end().bold(), body)
}

/// Framed block of lines, one per row
pub fn render_panel(lines: Vec<String>) -> String {
    let mut builder = Builder::default();
    for line in lines {
        builder.push_record([line]);
    }
    framed(builder.build()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_rounded_table_has_header_rule() {
        let mut builder = Builder::default();
        builder.push_record(["Name", "Age"]);
        builder.push_record(["Alice", "30"]);

        let rendered = rounded(builder.build()).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "╭───────┬─────╮");
        assert_eq!(lines[1], "│ Name  │ Age │");
        assert_eq!(lines[2], "├───────┼─────┤");
        assert_eq!(lines[3], "│ Alice │ 30  │");
        assert_eq!(lines[4], "╰───────┴─────╯");
    }

    #[test]
    fn test_title_is_centered_over_table() {
        plain();
        let mut builder = Builder::default();
        builder.push_record(["A", "B"]);

        // table is 9 chars wide: "│ A │ B │"
        let rendered = titled("Hi", &framed(builder.build()));
        assert_eq!(rendered.lines().next(), Some("   Hi"));
    }

    #[test]
    fn test_panel() {
        plain();
        let panel = render_panel(vec!["PM".to_string(), "Tool".to_string()]);
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines, vec!["╭──────╮", "│ PM   │", "│ Tool │", "╰──────╯"]);
    }
}
