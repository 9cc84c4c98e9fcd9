use anyhow::Result;
use clap::Parser;
use fb_catering::{
    constants::{DEFAULT_MENU_SERVICE_URL, DEFAULT_SHOP_ID},
    menu, EndpointBuilder,
};

#[derive(Parser, Debug)]
struct Args {
    #[arg(
        short = 'e',
        long,
        default_value = DEFAULT_MENU_SERVICE_URL,
        help = "Endpoint to retrieve the menu from."
    )]
    endpoint: String,
    #[arg(
        short = 's',
        long,
        default_value = DEFAULT_SHOP_ID,
        help = "Shop to request the menu for."
    )]
    shop_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let http = fb_catering::default_http_client()?;
    let endpoint = EndpointBuilder::default()
        .url(args.endpoint)
        .shop_id(args.shop_id)
        .build()?;
    let menu = menu::get::get(&http, &endpoint).await?;
    println!("{}", serde_json::to_string_pretty(&menu)?);
    Ok(())
}
