//! A switch and a custom button driven by the same toggle

use flipswitch::{Handler, PropsBag, Toggle, ToggleConfig};
use tracing_subscriber::EnvFilter;

// Stand-in for a view: prints what it would render.
fn switch(on: bool, props: &PropsBag) {
    println!(
        "   [Switch] {} {}",
        if on { "(on) " } else { "(off)" },
        serde_json::to_string(props).unwrap_or_default()
    );
}

fn button(label: &str, props: &PropsBag) {
    println!("   [Button] {label} {}", serde_json::to_string(props).unwrap_or_default());
}

fn main() -> flipswitch::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Prop Getters ===\n");
    let toggle = Toggle::new(ToggleConfig::new());

    let render = || {
        let switch_props = toggle.toggler_props(PropsBag::new().attr("on", toggle.on()));
        let button_props = toggle.toggler_props(
            PropsBag::new()
                .attr("aria-label", "custom-button")
                .attr("id", "custom-button-id")
                .with_on_click(Handler::new(|_: &()| tracing::info!("onButtonClick"))),
        );
        switch(toggle.on(), &switch_props);
        button(if toggle.on() { "on" } else { "off" }, &button_props);
        (switch_props, button_props)
    };

    println!("1. Initial render");
    let (switch_props, _) = render();

    println!("\n2. Clicking the switch");
    switch_props.click(&())?;
    let (_, button_props) = render();

    println!("\n3. Clicking the button");
    button_props.click(&())?;
    render();

    println!("\n✓ Done!");
    Ok(())
}
