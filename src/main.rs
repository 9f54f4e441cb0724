use anyhow::Context;

use surveydeck::config::DashboardConfig;
use surveydeck::core::app::Dashboard;
use surveydeck::core::network::HttpTransport;
use surveydeck::map::MapSurfaces;
use surveydeck::review::TableView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = DashboardConfig::load();
    let transport = HttpTransport::new(&config.backend_url)
        .with_context(|| format!("building client for {}", config.backend_url))?;
    let (surfaces, _probes) = MapSurfaces::headless();
    let app = Dashboard::new(config, transport, surfaces);

    println!("Backend: {}", app.config.backend_url);
    println!("Panel actions:");
    for (panel, action) in app.events().entries() {
        println!("  {} {action}", panel.label());
    }

    futures::join!(
        surveydeck::review::load_survey_captures(&app),
        surveydeck::review::load_finance_snapshot(&app),
    );

    let store = app.store();
    print_section("Overview", &store.metrics().lines().join("\n"));
    print_table("Survey captures", store.capture_list());
    print_table("Income", store.income_table());
    print_table("Expenses", store.expense_table());
    print_section("Mission area", &app.geometry().describe());
    print_section("Activity", &app.log().lines().join("\n"));
    Ok(())
}

fn print_section(title: &str, body: &str) {
    println!("\n== {title} ==\n{body}");
}

fn print_table(title: &str, table: &TableView) {
    print_section(title, &table.to_text());
}
