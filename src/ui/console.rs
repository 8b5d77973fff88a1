use colored::Colorize;

use crate::config::Settings;

pub struct Console;

impl Console {
    pub fn new() -> Self {
        Self
    }

    pub fn banner(&self) {
        let version = env!("CARGO_PKG_VERSION");

        println!(
            r#"
{}
{}
{}
{}
{}
{}
{}
{}
"#,
            " ██████╗██╗      ██████╗ ███████╗███████╗████████╗".bright_cyan(),
            "██╔════╝██║     ██╔═══██╗██╔════╝██╔════╝╚══██╔══╝".bright_cyan(),
            "██║     ██║     ██║   ██║███████╗█████╗     ██║   ".bright_cyan(),
            "██║     ██║     ██║   ██║╚════██║██╔══╝     ██║   ".bright_cyan(),
            "╚██████╗███████╗╚██████╔╝███████║███████╗   ██║   ".bright_cyan(),
            format!(" ╚═════╝╚══════╝ ╚═════╝ ╚══════╝╚══════╝   ╚═╝    v{}", version).bright_cyan(),
            "".normal(),
            "              Your Closet, With Opinions".dimmed(),
        );
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", "[INFO]".blue(), message);
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "[WARN]".yellow(), message);
    }

    pub fn error(&self, message: &str) {
        println!("{} {}", "[ERROR]".red(), message);
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "[OK]".green(), message);
    }

    pub fn predicted_label(&self, label: &str) {
        println!("{} Predicted: {}", "[OK]".green(), label.cyan().bold());
    }

    pub fn outfit(&self, items: &[String]) {
        println!("\n{}", "SUGGESTED OUTFIT".bold().underline());
        println!("{}", "─".repeat(50));
        if items.is_empty() {
            println!("  {}", "Your closet is empty - add some items first.".dimmed());
            return;
        }
        for item in items {
            println!("  {} {}", "•".cyan(), title_case(item).bold());
        }
    }

    pub fn explanation(&self, text: &str) {
        println!("\n{}", "STYLIST'S NOTES".bold().underline());
        println!("{}", "─".repeat(50));
        println!("  {}", text);
        println!();
    }

    pub fn list_items(&self, labels: &[String]) {
        println!("\n{}", "CLOSET".bold().underline());
        println!("{}", "─".repeat(50));
        if labels.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {}", i + 1, label.cyan());
        }
        println!();
    }

    pub fn similar_items(&self, labels: &[String]) {
        println!("\n{}", "CLOSEST MATCHES".bold().underline());
        println!("{}", "─".repeat(50));
        if labels.is_empty() {
            println!("  {}", "(closet is empty)".dimmed());
        }
        for (i, label) in labels.iter().enumerate() {
            println!("  {}. {}", i + 1, label.cyan());
        }
        println!();
    }

    pub fn show_config(&self, settings: &Settings) {
        println!("\n{}", "CONFIGURATION".bold().underline());
        println!("{}", "─".repeat(50));

        println!("\n  {}", "Models:".yellow());
        println!(
            "    classifier  {}",
            settings.classifier.model.as_str().dimmed()
        );
        println!(
            "    embedder    {} {}",
            settings.embedder.model.as_str().dimmed(),
            format!("(dim {})", settings.embedder.dimension).dimmed()
        );
        println!("    stylist     {}", settings.stylist.model.as_str().dimmed());

        println!(
            "\n  {} {}",
            "API base:".yellow(),
            settings.hub.api_base.as_str().dimmed()
        );
        println!(
            "  {} {}",
            "Token env:".yellow(),
            settings.hub.token_env.as_str().dimmed()
        );

        if let Ok(path) = settings.closet_path() {
            println!(
                "  {} {}",
                "Closet file:".yellow(),
                path.display().to_string().dimmed()
            );
        }
        if let Ok(path) = Settings::config_path() {
            println!(
                "  {} {}",
                "Config file:".yellow(),
                path.display().to_string().dimmed()
            );
        }
        println!();
    }

}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
