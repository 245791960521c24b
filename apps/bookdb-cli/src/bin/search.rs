use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use bookdb_client::{filter_category_options, Session};
use bookdb_core::config::{expand_path, Config};
use bookdb_core::types::{BookRecord, FacetResult, FieldHighlight};
use bookdb_engine::QueryEngine;
use bookdb_text::TantivyBookStore;

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;

    let mut index_dir = config.index_dir();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--index" => {
                if i + 1 < args.len() {
                    index_dir = expand_path(&args[i + 1]);
                    i += 1;
                } else {
                    eprintln!("Error: --index requires a path");
                    std::process::exit(1);
                }
            }
            other => {
                eprintln!("Error: unknown option '{}'", other);
                eprintln!("Usage: bookdb-search [--index <path>]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !index_dir.exists() {
        println!("❌ Index not found. Please run the indexer first:");
        println!("   cargo run --bin bookdb-indexer");
        std::process::exit(1);
    }

    let store = TantivyBookStore::open(&index_dir)?;
    let doc_count = store.num_docs();
    let engine = QueryEngine::new(Arc::new(store));
    let mut session = Session::new();

    println!("📚 Book Catalog Search");
    println!("======================");
    println!("Index: {} ({} documents)", index_dir.display(), doc_count);
    println!();
    show_help();

    loop {
        print!("search> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF on stdin.
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (input, ""),
        };

        match command {
            "/help" | "/h" => show_help(),
            "/quit" | "/q" | "quit" | "exit" => {
                println!("👋 Goodbye!");
                break;
            }
            "/facets" | "/f" => match engine.facets() {
                Ok(facets) => show_facets(&facets),
                Err(e) => println!("❌ Error showing facets: {}", e),
            },
            "/stats" | "/s" => {
                println!("Indexed documents: {}", doc_count);
                println!("Snapshot size:     {}", session.snapshot().len());
                println!("Visible now:       {}", session.visible().len());
            }
            "/filters" => show_filters(&session),
            "/clear" => {
                session.filters_mut().clear();
                println!("Filters cleared.");
                render(&session);
            }
            "/cats" => show_categories(&session, rest),
            "/cat" => {
                if rest.is_empty() {
                    println!("Usage: /cat <name>");
                    continue;
                }
                session.filters_mut().toggle_category(rest);
                show_filters(&session);
                render(&session);
            }
            "/price" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.len() != 2 {
                    println!("Usage: /price <min> <max>");
                    continue;
                }
                match (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                    (Ok(min), Ok(max)) => {
                        let filters = session.filters_mut();
                        filters.set_price_min(min);
                        filters.set_price_max(max);
                        show_filters(&session);
                        render(&session);
                    }
                    _ => println!("Usage: /price <min> <max>"),
                }
            }
            "/rating" => {
                if rest == "off" {
                    session.filters_mut().set_min_rating(None);
                    show_filters(&session);
                    render(&session);
                } else {
                    match rest.parse::<u8>() {
                        Ok(rating) => {
                            session.filters_mut().set_min_rating(Some(rating));
                            show_filters(&session);
                            render(&session);
                        }
                        Err(_) => println!("Usage: /rating <0-5|off>"),
                    }
                }
            }
            "/get" => {
                if rest.is_empty() {
                    println!("Usage: /get <id>");
                    continue;
                }
                match engine.get_by_id(rest) {
                    Ok(book) => show_book(&book),
                    Err(e) => println!("❌ {}", e),
                }
            }
            _ => match engine.search(Some(input)) {
                Ok(records) => {
                    println!("🔍 {} results for \"{}\"", records.len(), input);
                    session.replace_snapshot(records);
                    render(&session);
                }
                Err(e) => println!("❌ Search failed: {}", e),
            },
        }
    }

    Ok(())
}

fn show_help() {
    println!("Commands:");
    println!("  /help, /h           Show this help");
    println!("  /facets, /f         Corpus-wide facet counts");
    println!("  /cats [text]        Category options in the snapshot");
    println!("  /cat <name>         Toggle a category filter");
    println!("  /price <min> <max>  Price range filter (inclusive)");
    println!("  /rating <n|off>     Minimum rating filter");
    println!("  /filters            Show active filters");
    println!("  /clear              Clear all filters");
    println!("  /get <id>           Look up one book by id");
    println!("  /stats, /s          Index and snapshot statistics");
    println!("  /quit, /q           Exit");
    println!("  <anything else>     Full-text search");
    println!();
}

/// Print the filtered view of the current snapshot, highlights inline.
fn render(session: &Session) {
    let visible = session.visible();
    let total = session.snapshot().len();
    println!("Showing {} of {} records", visible.len(), total);

    const PAGE: usize = 20;
    for (i, book) in visible.iter().take(PAGE).enumerate() {
        let stars = "★".repeat(usize::from(book.rating));
        println!(
            "{:>3}. {:<52} {:>8.2}  {:<5} {}",
            i + 1,
            ellipsize(&book.title, 52),
            book.price,
            stars,
            book.categories.join(", ")
        );
        if let Some(highlights) = &book.highlights {
            if let Some(title) = &highlights.title {
                println!("     match: {}", bracket_spans(title));
            } else if let Some(description) = &highlights.description {
                println!("     match: {}", bracket_spans(description));
            }
        }
    }
    if visible.len() > PAGE {
        println!("     ... and {} more", visible.len() - PAGE);
    }
}

fn show_facets(facets: &FacetResult) {
    if facets.is_empty() {
        println!("(no facet data; the index is empty)");
        return;
    }
    for (name, buckets) in &facets.facets {
        println!("{}:", name);
        for bucket in buckets {
            println!("  {:<32} {:>6}", bucket.label, bucket.count);
        }
    }
}

fn show_categories(session: &Session, needle: &str) {
    let options = session.available_categories();
    if options.is_empty() {
        println!("(no categories in the snapshot; run a search first)");
        return;
    }
    let shown = filter_category_options(&options, needle);
    if shown.is_empty() {
        println!("No categories match \"{}\"", needle);
        return;
    }
    let selected = session.filters().selected_categories();
    for option in &shown {
        let marker = if selected.iter().any(|s| s.eq_ignore_ascii_case(option)) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("  {} {}", marker, option);
    }
}

fn show_filters(session: &Session) {
    let filters = session.filters();
    if filters.is_neutral() {
        println!("No filters active.");
        return;
    }
    if !filters.selected_categories().is_empty() {
        println!("Categories: {}", filters.selected_categories().join(", "));
    }
    let (min, max) = filters.price_range();
    if (min, max) != (0.0, f64::INFINITY) {
        if max.is_finite() {
            println!("Price: {:.2} to {:.2}", min, max);
        } else {
            println!("Price: at least {:.2}", min);
        }
    }
    if let Some(rating) = filters.min_rating() {
        println!("Rating: {}+", rating);
    }
}

fn show_book(book: &BookRecord) {
    println!("{}", book.title);
    println!("  id:         {}", book.id);
    println!("  price:      {:.2}", book.price);
    println!("  rating:     {}", book.rating);
    println!("  reviews:    {}", book.review_count);
    if !book.categories.is_empty() {
        println!("  categories: {}", book.categories.join(", "));
    }
    if let Some(url) = &book.image_url {
        println!("  image:      {}", url);
    }
    if !book.description.is_empty() {
        println!("  {}", ellipsize(&book.description, 300));
    }
}

/// Render a highlight fragment with the matched ranges in brackets.
/// Spans are byte offsets into the fragment.
fn bracket_spans(highlight: &FieldHighlight) -> String {
    let fragment = highlight.fragment.as_str();
    let mut out = String::with_capacity(fragment.len() + 2 * highlight.spans.len());
    let mut cursor = 0;
    for span in &highlight.spans {
        let in_bounds = span.start >= cursor
            && span.end <= fragment.len()
            && fragment.is_char_boundary(span.start)
            && fragment.is_char_boundary(span.end);
        if !in_bounds {
            continue;
        }
        out.push_str(&fragment[cursor..span.start]);
        out.push('[');
        out.push_str(&fragment[span.start..span.end]);
        out.push(']');
        cursor = span.end;
    }
    out.push_str(&fragment[cursor..]);
    out
}

fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
