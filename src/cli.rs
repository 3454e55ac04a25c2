use clap::{Parser, Subcommand};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::ResourceKind;

#[derive(Parser)]
#[command(name = "shopadmin")]
#[command(about = "Terminal admin console for the orders, products, reviews and users of a shop backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides SHOPADMIN_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Defaults to the interactive TUI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive admin console
    Tui {
        /// Screen to open first (orders, products, reviews, users)
        #[arg(short, long, default_value = "orders")]
        screen: String,
    },

    /// Print every record of a resource and exit
    List {
        /// Resource to list (orders, products, reviews, users)
        resource: String,
    },

    /// Create a record with the same validation the console applies
    Create {
        #[command(subcommand)]
        record: CreateCommand,
    },
}

#[derive(Subcommand)]
pub enum CreateCommand {
    /// Create an order
    Order {
        #[arg(long, default_value = "")]
        user_id: String,
        #[arg(long, default_value = "")]
        total_amount: String,
        /// pending, shipped or delivered
        #[arg(long, default_value = "")]
        status: String,
    },

    /// Create a product
    Product {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        stock: String,
    },

    /// Create a review
    Review {
        #[arg(long, default_value = "")]
        user_id: String,
        #[arg(long, default_value = "")]
        product_id: String,
        /// 1 to 5
        #[arg(long, default_value = "")]
        rating: String,
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Create a user
    User {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
}

impl Commands {
    pub fn parse_resource(resource: &str) -> Result<ResourceKind, anyhow::Error> {
        resource.parse()
    }
}

impl CreateCommand {
    pub fn kind(&self) -> ResourceKind {
        match self {
            CreateCommand::Order { .. } => ResourceKind::Orders,
            CreateCommand::Product { .. } => ResourceKind::Products,
            CreateCommand::Review { .. } => ResourceKind::Reviews,
            CreateCommand::User { .. } => ResourceKind::Users,
        }
    }

    /// Form values keyed by the screen's field keys
    pub fn form_values(&self) -> Vec<(&'static str, &str)> {
        match self {
            CreateCommand::Order { user_id, total_amount, status } => vec![
                ("user_id", user_id.as_str()),
                ("total_amount", total_amount.as_str()),
                ("status", status.as_str()),
            ],
            CreateCommand::Product { name, description, price, stock } => vec![
                ("name", name.as_str()),
                ("description", description.as_str()),
                ("price", price.as_str()),
                ("stock", stock.as_str()),
            ],
            CreateCommand::Review { user_id, product_id, rating, text } => vec![
                ("user_id", user_id.as_str()),
                ("product_id", product_id.as_str()),
                ("rating", rating.as_str()),
                ("review_text", text.as_str()),
            ],
            CreateCommand::User { name, email, password } => vec![
                ("name", name.as_str()),
                ("email", email.as_str()),
                ("password", password.as_str()),
            ],
        }
    }
}

/// Truncate string to the given display width with ellipsis
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 3 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}

const MAX_COLUMN_WIDTH: usize = 40;

/// Plain-text table with a dashed rule under the header
pub fn render_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate_string(cell, MAX_COLUMN_WIDTH)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(column.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width - cell.width())))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    let mut lines = vec![format_row(&header[..]), "-".repeat(total_width)];
    lines.extend(cells.iter().map(|row| format_row(row.as_slice())));
    lines.join("\n")
}
