use std::env;
use std::fs;

use anyhow::Context;
use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use vasicek_qmc::scenario::run_document;
use vasicek_qmc::scenario::BondPricing;
use vasicek_qmc::scenario::InputDocument;

const INPUT_FILE: &str = "input.json";

fn price_file(path: &str) -> Result<BondPricing> {
  let raw = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
  let document: InputDocument =
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))?;

  run_document(&document).context("pricing failed")
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let path = env::args().nth(1).unwrap_or_else(|| INPUT_FILE.to_string());
  let pricing = price_file(&path)?;
  println!("{}", serde_json::to_string(&pricing)?);

  Ok(())
}
