use clap::{Parser, Subcommand};

mod discount;
mod order;
mod product;
mod session;

#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Session(session::SessionCommand),
    Product(product::ProductCommand),
    Discount(discount::DiscountCommand),
    Order(order::OrderCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Session(command) => session::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Discount(command) => discount::run(command).await,
            Commands::Order(command) => order::run(command).await,
        }
    }
}
