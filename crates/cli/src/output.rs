//! Output formatting for the CLI.

use console::style;
use pantry_events::Signal;
use pantry_inventory::{EntryForm, ExpiryContext, Item, ItemStatus};
use serde::Serialize;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

/// One row of `pantry list --json`.
#[derive(Serialize)]
pub struct ItemRow<'a> {
    #[serde(flatten)]
    pub item: &'a Item,
    pub status: ItemStatus,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(err) => tracing::error!(error = %err, "unable to render JSON output"),
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print items as a table, or as JSON rows with their derived status.
    pub fn items(&self, items: &[Item], ctx: &ExpiryContext) {
        if self.json {
            let rows: Vec<ItemRow<'_>> = items
                .iter()
                .map(|item| ItemRow {
                    item,
                    status: item.status(ctx),
                })
                .collect();
            self.json(&rows);
            return;
        }

        let widths = [24, 5, 18, 12, 36];
        for item in items {
            let status = item.status(ctx);
            let name = format!("{} {}", item.icon(), item.name());
            let quantity = format!("x{}", item.quantity());
            let expiry = status.expiry_label();
            let stock = status.stock_label().unwrap_or("");
            let id = item.id().to_string();
            self.table_row(&[&name, &quantity, &expiry, stock, &id], &widths);
        }
    }

    /// Print a single item with its status.
    pub fn item(&self, item: &Item, ctx: &ExpiryContext) {
        let status = item.status(ctx);
        if self.json {
            self.json(&ItemRow { item, status });
            return;
        }

        println!("  {} {}", item.icon(), style(item.name()).bold());
        if let Some(headline) = status.headline() {
            self.kv("status", &headline);
        }
        self.kv("id", &item.id().to_string());
        self.kv("category", item.category().display_name());
        self.kv("quantity", &item.quantity().to_string());
        self.kv("price", &item.price().to_string());
        if !item.code().is_empty() {
            self.kv("code", item.code());
        }
        self.kv("expires", &format!("{} ({})", item.expires_on(), status.expiry_label()));
    }

    /// Print an entry form as it would be presented for editing.
    pub fn form(&self, form: &EntryForm) {
        if self.json {
            self.json(form);
            return;
        }

        self.header(form.intent.title());
        self.kv("name", &form.name);
        self.kv("category", &format!("{} {}", form.icon, form.category));
        self.kv("quantity", &form.quantity.to_string());
        self.kv("price", &form.price.to_string());
        if !form.code.is_empty() {
            self.kv("code", &form.code);
        }
        self.kv("expires", &form.expires_on.to_string());
    }

    /// Terminal stand-in for haptic feedback.
    pub fn signal(&self, signal: Signal) {
        match signal {
            Signal::Success | Signal::Impact => tracing::debug!(signal = %signal, "feedback"),
            Signal::Failure => self.warn("The last action did not complete; see the log for details."),
        }
    }
}
