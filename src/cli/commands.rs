use crate::app::CatalogApp;
use crate::cart::message::{card_prices, price_text};
use crate::cart::FileStorage;
use crate::config::CatalogConfig;
use crate::core::view::{SortMode, ViewQuery};
use crate::error::{CatalogError, CatalogResult};
use crate::loader::{self, CatalogSource};
use crate::types::Product;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

/// Descriptions longer than this are shortened in listings
const DESCRIPTION_PREVIEW: usize = 170;

/// Cart operation requested from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Increment,
    Decrement,
    Remove,
}

fn open_app(config: &CatalogConfig) -> CatalogResult<CatalogApp<FileStorage>> {
    CatalogApp::open_blocking(config.clone())
}

/// Shorten a description for one-line listings
fn preview(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_PREVIEW {
        let short: String = text.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{}…", short.trim_end())
    } else {
        text.to_string()
    }
}

fn print_product(product: &Product, quantity: u32) {
    let (ars, usd) = card_prices(product);
    let meta = if product.kind.is_empty() {
        &product.category
    } else {
        &product.kind
    };
    print!("   {} {}", product.code.bold(), format!("({})", meta).dimmed());
    print!("  {}", ars.green());
    if let Some(usd) = usd {
        print!("  {}", usd.cyan());
    }
    if quantity > 0 {
        print!("  {}", format!("🛒 x{}", quantity).yellow());
    }
    println!();
    if !product.description.is_empty() {
        println!("      {}", preview(&product.description));
    }
    println!("      {}", product.id.dimmed());
}

/// Execute the load command - parse the workbook and summarize it
pub fn load(config: &CatalogConfig, json: bool, verbose: bool) -> CatalogResult<()> {
    let catalog = loader::load_catalog_blocking(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("{}", "🛍️  Vitrina - Catalog".bold().green());
    println!("   Source: {}\n", CatalogSource::parse(&config.source));

    for category in &catalog.categories {
        let count = catalog
            .products
            .iter()
            .filter(|p| &p.category == category)
            .count();
        println!("   📂 {} ({})", category.bright_blue().bold(), count);
        if verbose {
            for product in catalog.products.iter().filter(|p| &p.category == category) {
                println!("      {} - {}", product.code, price_text(product));
            }
        }
    }

    let priced = catalog
        .products
        .iter()
        .filter(|p| p.effective_ars().is_some() || p.price_usd.is_some())
        .count();
    println!();
    println!(
        "{}",
        format!(
            "✅ {} products in {} categories ({} with price)",
            catalog.len(),
            catalog.categories.len(),
            priced
        )
        .bold()
        .green()
    );
    Ok(())
}

/// Execute the list command - filter, sort and optionally group products
pub fn list(config: &CatalogConfig, query: &ViewQuery, grouped: bool) -> CatalogResult<()> {
    let app = open_app(config)?;
    let items = app.view(query);
    let counts = app.counts(items.len());

    println!(
        "{} {} visible / {} total, {} categories, {} in cart\n",
        "🛍️ ".bold(),
        counts.visible.to_string().bold(),
        counts.total,
        counts.categories,
        counts.in_cart
    );

    if items.is_empty() {
        println!("{}", "No products match those filters.".yellow());
        return Ok(());
    }

    if grouped {
        for group in app.grouped_view(query) {
            println!(
                "📂 {} ({})",
                group.category.bright_blue().bold(),
                group.products.len()
            );
            for product in group.products {
                print_product(product, app.cart().quantity(&product.id));
            }
            println!();
        }
    } else {
        for product in items {
            print_product(product, app.cart().quantity(&product.id));
        }
    }
    Ok(())
}

/// Execute the cart show command
pub fn cart_show(config: &CatalogConfig) -> CatalogResult<()> {
    let app = open_app(config)?;
    print_cart(&app);
    Ok(())
}

fn print_cart(app: &CatalogApp<FileStorage>) {
    println!("{}", "🛒 Cart".bold().green());
    let lines = app.cart_lines();
    if lines.is_empty() {
        println!("   Your cart is empty. Add products from the catalog.");
    }
    for line in &lines {
        println!(
            "   {} x {} {}  {}",
            line.quantity.to_string().bold(),
            line.product.code.bold(),
            format!("({})", line.product.category).dimmed(),
            price_text(line.product).green()
        );
    }
    let stale = app.cart().items().len() - lines.len();
    if stale > 0 {
        println!(
            "   {}",
            format!("{} entries not in the current catalog", stale).dimmed()
        );
    }
    println!("   Total: {}", app.cart_total_text().bold());
}

/// Execute a cart mutation and show the resulting cart
pub fn cart_update(config: &CatalogConfig, action: CartAction, id: &str) -> CatalogResult<()> {
    let mut app = open_app(config)?;
    let quantity = match action {
        CartAction::Add => app.add_to_cart(id)?,
        CartAction::Increment => app.increment(id)?,
        CartAction::Decrement => app.decrement(id)?,
        CartAction::Remove => app.remove(id)?,
    };
    println!("   {} {} → {}", "✏️ ".bold(), id.bright_blue(), quantity);
    print_cart(&app);
    Ok(())
}

/// Execute the order command - print the order text and WhatsApp link
pub fn order(config: &CatalogConfig, link_only: bool) -> CatalogResult<()> {
    let app = open_app(config)?;
    if link_only {
        println!("{}", app.order_link());
        return Ok(());
    }
    println!("{}", "📨 Order message".bold().green());
    println!("{}\n", app.order_message());
    println!("   Total: {}", app.cart_total_text().bold());
    println!("   WhatsApp: {}", app.order_link().cyan());
    Ok(())
}

/// Execute the watch command - reload the catalog whenever the workbook changes
pub fn watch(config: &CatalogConfig) -> CatalogResult<()> {
    let file = match CatalogSource::parse(&config.source) {
        CatalogSource::Path(path) => path,
        CatalogSource::Url(url) => {
            return Err(CatalogError::Watch(format!(
                "Only local workbooks can be watched, got {}",
                url
            )));
        }
    };

    println!("{}", "👁️  Vitrina - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(CatalogError::Watch(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| CatalogError::Watch("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| CatalogError::Watch(format!("Failed to create file watcher: {}", e)))?;
    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| CatalogError::Watch(format!("Failed to watch directory: {}", e)))?;

    println!("{}", "🔄 Initial load...".cyan());
    run_reload(config);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any && is_same_file(&event.path, &canonical_path)
                });
                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        chrono::Local::now().format("%H:%M:%S").to_string().cyan()
                    );
                    run_reload(config);
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn is_same_file(event_path: &Path, watched: &Path) -> bool {
    if let Ok(canonical) = event_path.canonicalize() {
        if canonical == watched {
            return true;
        }
    }
    event_path.file_name().is_some() && event_path.file_name() == watched.file_name()
}

fn run_reload(config: &CatalogConfig) {
    match loader::load_catalog_blocking(config) {
        Ok(catalog) => println!(
            "{}",
            format!(
                "✅ Loaded {} products in {} categories",
                catalog.len(),
                catalog.categories.len()
            )
            .bold()
            .green()
        ),
        Err(e) => println!("{} {}", "❌ Could not load the workbook:".bold().red(), e),
    }
}

/// Parse a sort mode flag
pub fn parse_sort(value: &str) -> CatalogResult<SortMode> {
    value.parse().map_err(CatalogError::Config)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
