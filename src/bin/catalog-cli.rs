use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Method};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Command-line client for the product catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9090")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// POST text to the default echo handler
    Echo { data: String },
    /// POST a name to /helloworld
    Hello { name: String },
    /// List all products
    List,
    /// Add a product
    Add(ProductArgs),
    /// Replace the product with the given id
    Update(ProductArgs),
    /// Run every endpoint once against a live service
    Smoke,
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    sku: String,
}

impl ProductArgs {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "sku": self.sku,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Echo { data } => {
            send(&client, Method::POST, &format!("{}/", base), Body::Text(data)).await?;
        }
        Commands::Hello { name } => {
            send(&client, Method::POST, &format!("{}/helloworld", base), Body::Text(name)).await?;
        }
        Commands::List => {
            send(&client, Method::GET, &format!("{}/products", base), Body::Empty).await?;
        }
        Commands::Add(product) => {
            let body = Body::Json(product.to_json());
            send(&client, Method::POST, &format!("{}/products", base), body).await?;
        }
        Commands::Update(product) => {
            let body = Body::Json(product.to_json());
            send(&client, Method::PUT, &format!("{}/products", base), body).await?;
        }
        Commands::Smoke => smoke(&client, &base).await?,
    }

    Ok(())
}

enum Body {
    Empty,
    Text(String),
    Json(Value),
}

async fn send(
    client: &Client,
    method: Method,
    url: &str,
    body: Body,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", method, url);
    let req = client.request(method, url);
    let req = match body {
        Body::Empty => req,
        Body::Text(text) => req.body(text),
        Body::Json(value) => req.json(&value),
    };
    print_response(req.send().await?).await
}

async fn smoke(client: &Client, base: &str) -> Result<(), Box<dyn std::error::Error>> {
    let products = format!("{}/products", base);

    send(client, Method::POST, &format!("{}/", base), Body::Text("smoke".into())).await?;
    send(client, Method::POST, &format!("{}/helloworld", base), Body::Text("World".into())).await?;
    send(client, Method::GET, &products, Body::Empty).await?;

    let cappuccino = json!({
        "id": 3,
        "name": "Cappuccino",
        "description": "Espresso with steamed milk foam",
        "price": 11.99,
        "sku": "cap001",
    });
    send(client, Method::POST, &products, Body::Json(cappuccino)).await?;

    let espresso = json!({
        "id": 1,
        "name": "Espresso Updated",
        "description": "Short and strong",
        "price": 10.99,
        "sku": "esp001",
    });
    send(client, Method::PUT, &products, Body::Json(espresso)).await?;

    send(client, Method::GET, &products, Body::Empty).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: catalog returned status {}", status);
        eprintln!("Response: {}", text.trim_end());
        return Ok(());
    }

    println!("Status: {}", status);
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
