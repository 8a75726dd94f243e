//! Console host for the Fashion Sales Agent client core.
//! Run with: `cargo run --bin fsa-console`
//!
//! Wires the session/cart store to file persistence and either the real
//! backend (`FSA_BACKEND_URL`) or the offline mock agent.

use std::io::{BufRead, Write};

use anyhow::Context;

use fashion_agent_core::SessionCartStore;
use fashion_agent_core::backend::{BackendClient, ChatRequest, MockAgent};
use fashion_agent_core::store::types::Product;
use fashion_agent_core::store::{FileStorage, Message};

/// Directory for persisted state, overridable via `FSA_DATA_DIR`.
const DEFAULT_DATA_DIR: &str = ".fsa_data";

enum Agent {
    Remote(BackendClient),
    Mock(MockAgent),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let data_dir =
        std::env::var("FSA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let storage = FileStorage::new(&data_dir)
        .with_context(|| format!("cannot create data directory {data_dir}"))?;
    let mut store = SessionCartStore::new(Box::new(storage));

    let agent = match std::env::var("FSA_BACKEND_URL") {
        Ok(url) => {
            println!("Using backend at {url}");
            Agent::Remote(BackendClient::new(&url)?)
        }
        Err(_) => {
            println!("No FSA_BACKEND_URL set, using the offline mock agent");
            Agent::Mock(MockAgent::new())
        }
    };

    let Some(email) = prompt("Email: ")? else {
        return Ok(());
    };
    store.activate(email.clone());
    println!(
        "Welcome back! {} session(s), cart total {:.2}",
        store.sessions().len(),
        store.cart_total()
    );
    println!("Commands: /new /sessions /cart /add <n> /quit");

    let mut last_recommendations: Vec<Product> = Vec::new();
    loop {
        let Some(line) = prompt("> ")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" => break,
            "/new" => {
                let id = store.create_session();
                println!("Started session {id}");
            }
            "/sessions" => {
                for session in store.sessions() {
                    let marker = if Some(&session.id) == store.active_session_id() {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} [{}] {}", session.id, session.title);
                }
            }
            "/cart" => {
                for (index, item) in store.cart().iter().enumerate() {
                    println!(
                        "{index}: {} x{} @ {:.2}",
                        item.product.name, item.quantity, item.product.price
                    );
                }
                println!("Total: {:.2}", store.cart_total());
            }
            _ => {
                if let Some(arg) = line.strip_prefix("/add ") {
                    add_recommendation(&mut store, &last_recommendations, arg);
                    continue;
                }
                let reply = match &agent {
                    Agent::Remote(client) => {
                        let session_id = store
                            .active_session_id()
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        let request = ChatRequest::new(session_id, email.as_str(), line);
                        match client.send_chat(&request).await {
                            Ok(reply) => reply,
                            Err(err) if err.is_retryable() => {
                                println!("Backend unavailable ({err}), try again");
                                continue;
                            }
                            Err(err) => {
                                println!("Backend error: {err}");
                                continue;
                            }
                        }
                    }
                    Agent::Mock(mock) => mock.reply(line),
                };

                if let Some(id) = store.active_session_id().cloned() {
                    store.append_message(&id, Message::user(line))?;
                    last_recommendations = reply.recommendations.clone();
                    let bot = reply.into_message();
                    println!("agent: {}", bot.text);
                    for (index, product) in bot.recommendations.iter().enumerate() {
                        println!(
                            "  ({index}) {} by {} at {:.2}",
                            product.name, product.brand, product.price
                        );
                    }
                    store.append_message(&id, bot)?;
                }
            }
        }
    }

    store.deactivate();
    println!("Bye!");
    Ok(())
}

fn add_recommendation(store: &mut SessionCartStore, recommendations: &[Product], arg: &str) {
    let Ok(index) = arg.trim().parse::<usize>() else {
        println!("Usage: /add <recommendation index>");
        return;
    };
    let Some(product) = recommendations.get(index) else {
        println!("No recommendation at index {index}");
        return;
    };
    match store.add_to_cart(product.clone(), 1) {
        Ok(()) => println!("Added {} to cart ({} items)", product.name, store.cart_count()),
        Err(err) => println!("Could not add to cart: {err}"),
    }
}

fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    let bytes = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}
