use sitmap::{
    data::geojson::{load_from_url, WORLD_GEOJSON_URL},
    prelude::*,
};

/// Runs the dashboard without any UI: simulates a minute of movement,
/// switches theater, waits for the situational report and writes an SVG.
///
/// Pass `--offline` to skip the geography download.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sitmap::init_logging();
    let offline = std::env::args().any(|a| a == "--offline");

    println!("🛰️  sitmap headless");
    println!("===================");

    let mut dashboard = DashboardBuilder::headless(1280.0, 800.0)
        .with_trails(true)
        .build()?;

    if !offline {
        match load_from_url(WORLD_GEOJSON_URL).await {
            Ok(geography) => dashboard.set_geography(geography),
            Err(e) => println!("⚠️  no geography ({}), drawing assets only", e),
        }
    }

    // a minute of simulated time, one tick per second
    let start = Instant::now();
    let mut moved = 0;
    for second in 0..=60 {
        let stats = dashboard.pump(start + Duration::from_secs(second), chrono::Utc::now());
        moved += stats.moved;
    }
    println!("✅ simulated 60 ticks, {} asset moves", moved);

    let counts = dashboard.status_counts();
    println!(
        "   ACTIVE {} | ALERT {} | STANDBY {}",
        counts.active, counts.alert, counts.standby
    );

    dashboard.select_theater(Theater::Pacific, Instant::now());
    println!("\n🎯 theater -> {}", dashboard.hud().loc_label());

    // the fetch runs on tokio; pump until it lands
    while dashboard.is_loading() {
        tokio::time::sleep(Duration::from_millis(100)).await;
        dashboard.pump(Instant::now(), chrono::Utc::now());
    }

    if let Some(report) = dashboard.report() {
        println!("\n📋 threat {}", report.threat_level.label());
        println!("   {}", report.summary);
        for item in &report.news {
            println!("   • {} ({})", item.title, item.url);
        }
    }

    let svg = dashboard.export_svg()?;
    std::fs::write("sitmap.svg", &svg)?;
    println!("\n🖼️  wrote sitmap.svg ({} bytes)", svg.len());

    dashboard.shutdown();
    Ok(())
}
