use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    core_config::tracing::install_color_eyre();
    cli::run_cli(Migrator).await;
}
