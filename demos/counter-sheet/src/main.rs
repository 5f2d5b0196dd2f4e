use std::time::Duration;

use anyhow::{Context, bail};
use counter_sheet::{App, DemoConfig};
use local_sheet::sheet_module;
use sheet_inject::Container;
use sheet_ui::Host;
use tokio::task::LocalSet;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = DemoConfig::from_env()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;
    LocalSet::new().block_on(&rt, session(config))
}

/// Scripted walk through the demo: open the sheet, let it count, dismiss it
/// with back, open it again and close it with its own button.
async fn session(config: DemoConfig) -> anyhow::Result<()> {
    let container = Container::start([sheet_module(), counter_sheet::app_module(&config)]);
    let mut host = Host::new(config.frame_interval());
    let mut build = || App(&container, &config);
    let tick = config.counter_interval();

    host.frame(&mut build);
    print_frame("start", &host);

    click(&host, "Show Counter Bottom Sheet")?;
    host.pump(&mut build, tick * 3 + tick / 2).await;
    print_frame("counting", &host);

    if !host.press_back() {
        bail!("back press was not handled by the sheet");
    }
    host.pump(&mut build, Duration::from_millis(100)).await;
    print_frame("dismissed with back", &host);

    click(&host, "Show Counter Bottom Sheet")?;
    host.pump(&mut build, tick + tick / 2).await;
    print_frame("shown again", &host);

    click(&host, "Hide Sheet")?;
    host.pump(&mut build, Duration::from_millis(100)).await;
    print_frame("hidden", &host);

    log::info!(
        "{} frames, {} open scope(s) left",
        host.frames(),
        container.open_scopes()
    );
    Ok(())
}

fn click(host: &Host, label: &str) -> anyhow::Result<()> {
    if !host.click(label) {
        bail!("no clickable `{label}` on screen");
    }
    Ok(())
}

fn print_frame(step: &str, host: &Host) {
    println!("== {step}");
    print!("{}", host.dump());
}
