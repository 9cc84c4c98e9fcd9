use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use fb_catering::{
    constants::{DEFAULT_MENU_SERVICE_URL, DEFAULT_SHOP_ID},
    format_cents, Basket, Category, Client, Dish, DishType, EndpointBuilder, Listing, Quantity,
    ResponseCache,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Browse the restaurant menu and fill a basket")]
struct CliArgs {
    #[command(subcommand)]
    pub subcommand: Command,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    #[arg(
        short = 'e',
        long,
        env = "FORKBOT_MENU_URL",
        default_value = DEFAULT_MENU_SERVICE_URL,
        global = true,
        help = "Menu service endpoint"
    )]
    pub endpoint: String,

    #[arg(
        short = 's',
        long,
        env = "FORKBOT_SHOP_ID",
        default_value = DEFAULT_SHOP_ID,
        global = true,
        help = "Shop to request the menu for"
    )]
    pub shop_id: String,

    #[arg(
        short = 'c',
        long,
        global = true,
        help = "File to keep the last menu response in between runs"
    )]
    pub cache_file: Option<PathBuf>,

    #[arg(
        short = 'b',
        long,
        default_value = "basket.json",
        global = true,
        help = "File the basket is kept in"
    )]
    pub basket_file: PathBuf,

    #[arg(short = 'r', long, global = true, help = "Ignore the cached menu")]
    pub refresh: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    #[clap(name = "menu", about = "List the dishes of a category")]
    Menu { category: DishType },

    #[clap(name = "dish", about = "Show one dish in detail")]
    Dish { category: DishType, name: String },

    #[clap(name = "basket", about = "Manage the basket")]
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum BasketAction {
    #[clap(about = "Show the basket contents")]
    Show,

    #[clap(about = "Add a dish to the basket")]
    Add {
        category: DishType,
        name: String,
        #[arg(
            short = 'q',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "How many to order"
        )]
        quantity: u32,
    },

    #[clap(about = "Remove the entry at a position (as listed by `basket show`)")]
    Remove { index: usize },

    #[clap(about = "Remove the most recently added entry")]
    Undo,
}

fn dish_summary(dish: &Dish) -> Value {
    json!({
        "name": dish.name,
        "price": dish.display_price(),
        "thumbnail": dish.thumbnail(),
    })
}

fn dish_detail(dish: &Dish) -> Value {
    json!({
        "name": dish.name,
        "ingredients": dish.ingredient_summary(),
        "images": dish.images,
        "prices": dish
            .prices
            .iter()
            .map(|price| json!({ "size": price.size, "price": price.to_string() }))
            .collect::<Vec<_>>(),
    })
}

fn basket_summary(basket: &Basket) -> Value {
    json!({
        "count": basket.count(),
        "items": basket
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| json!({
                "index": index,
                "name": item.dish.name,
                "quantity": item.quantity.get(),
                "subtotal": format_cents(item.subtotal()),
            }))
            .collect::<Vec<_>>(),
        "total": format_cents(basket.total()),
    })
}

async fn load_cache(path: Option<&Path>) -> ResponseCache {
    let Some(path) = path.filter(|path| path.exists()) else {
        return ResponseCache::default();
    };
    match ResponseCache::load(path).await {
        Ok(cache) => cache,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable menu cache");
            ResponseCache::default()
        }
    }
}

async fn load_basket(path: &Path) -> Result<Basket> {
    if !path.exists() {
        return Ok(Basket::new());
    }
    Basket::load(path)
        .await
        .with_context(|| format!("unable to load basket from {}", path.display()))
}

fn loading_spinner(category: DishType) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Loading {category}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// The category view. An unreachable service is logged and shows up as an empty list.
async fn list_category(client: &mut Client, category: DishType, refresh: bool) -> Result<Value> {
    let mut listing = Listing::new(category);
    if refresh {
        listing.refresh(client).await?;
    } else {
        listing.load(client).await?;
    }
    Ok(json!({
        "category": listing.title(),
        "dishes": listing.dishes().iter().map(dish_summary).collect::<Vec<_>>(),
    }))
}

async fn fetch_category(client: &mut Client, category: DishType, refresh: bool) -> Result<Category> {
    let spinner = loading_spinner(category)?;
    let result = if refresh {
        client.refresh_category(category).await
    } else {
        client.get_category(category).await
    };
    spinner.finish_and_clear();
    Ok(result?)
}

fn find_dish(category: &Category, name: &str) -> Result<Dish> {
    category
        .dish(name)
        .cloned()
        .ok_or_else(|| anyhow!("no dish named {name:?} in {}", category.name))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = CliArgs::parse();
    let opts = args.global_opts;

    let endpoint = EndpointBuilder::default()
        .url(opts.endpoint.clone())
        .shop_id(opts.shop_id.clone())
        .build()?;
    let http = fb_catering::default_http_client()?;
    let cache = load_cache(opts.cache_file.as_deref()).await;
    let mut client = Client::new(http, Some(endpoint)).with_cache(cache);

    let output = match args.subcommand {
        Command::Menu { category } => {
            let spinner = loading_spinner(category)?;
            let listing = list_category(&mut client, category, opts.refresh).await;
            spinner.finish_and_clear();
            listing?
        }
        Command::Dish { category, name } => {
            let category = fetch_category(&mut client, category, opts.refresh).await?;
            dish_detail(&find_dish(&category, &name)?)
        }
        Command::Basket { action } => {
            let mut basket = load_basket(&opts.basket_file).await?;
            match action {
                BasketAction::Show => {}
                BasketAction::Add {
                    category,
                    name,
                    quantity,
                } => {
                    let category = fetch_category(&mut client, category, opts.refresh).await?;
                    let dish = find_dish(&category, &name)?;
                    let item = basket.add(dish, Quantity::try_from(quantity)?);
                    info!(dish = %item.dish.name, quantity, "added to basket");
                }
                BasketAction::Remove { index } => {
                    let item = basket
                        .remove(index)
                        .ok_or_else(|| anyhow!("no basket entry at position {index}"))?;
                    info!(dish = %item.dish.name, "removed from basket");
                }
                BasketAction::Undo => match basket.undo_last() {
                    Some(item) => info!(dish = %item.dish.name, "removed from basket"),
                    None => warn!("the basket is already empty"),
                },
            }
            basket
                .save(&opts.basket_file)
                .await
                .with_context(|| format!("unable to save basket to {}", opts.basket_file.display()))?;
            basket_summary(&basket)
        }
    };

    if let Some(path) = opts.cache_file.as_deref() {
        if !client.cache().is_empty() {
            client
                .cache()
                .save(path)
                .await
                .with_context(|| format!("unable to save menu cache to {}", path.display()))?;
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
