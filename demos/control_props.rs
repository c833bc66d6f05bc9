//! Two toggles bound to one parent value, plus an uncontrolled one

use flipswitch::{Action, PropsBag, Toggle, ToggleConfig, ToggleState};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct AppState {
    both_on: bool,
    times_clicked: usize,
}

struct App {
    state: Arc<Mutex<AppState>>,
    controlled: [Toggle; 2],
    uncontrolled: Toggle,
}

impl App {
    fn new() -> Self {
        let uncontrolled = Toggle::new(ToggleConfig::new().on_change(|state, action| {
            tracing::info!(?state, ?action, "Uncontrolled Toggle onChange");
        }));
        let app = Self {
            state: Arc::default(),
            controlled: [
                Toggle::new(ToggleConfig::new().controlled(false).on_change(|_, _| {})),
                Toggle::new(ToggleConfig::new().controlled(false).on_change(|_, _| {})),
            ],
            uncontrolled,
        };
        app.commit();
        app
    }

    // Feed the current parent value to both controlled toggles.
    fn commit(&self) {
        let both_on = self.state.lock().map(|s| s.both_on).unwrap_or_default();
        for toggle in &self.controlled {
            let state = Arc::clone(&self.state);
            toggle.update(ToggleConfig::new().controlled(both_on).on_change(
                move |suggested: &ToggleState, action: &Action| {
                    let Ok(mut app) = state.lock() else { return };
                    if *action == Action::Toggle && app.times_clicked > 4 {
                        return;
                    }
                    app.both_on = suggested.on;
                    app.times_clicked += 1;
                },
            ));
        }
    }

    fn reset(&self) {
        if let Ok(mut app) = self.state.lock() {
            app.both_on = false;
            app.times_clicked = 0;
        }
        self.commit();
    }

    fn click(&self, toggle: &Toggle) -> flipswitch::Result<()> {
        toggle.toggler_props::<()>(PropsBag::new()).click(&())?;
        self.commit();
        Ok(())
    }

    fn render(&self) {
        let label = |on: bool| if on { "on " } else { "off" };
        let times_clicked = self
            .state
            .lock()
            .map(|s| s.times_clicked)
            .unwrap_or_default();
        println!(
            "   [{}] [{}]  {}   uncontrolled: [{}]",
            label(self.controlled[0].on()),
            label(self.controlled[1].on()),
            if times_clicked > 4 {
                "Whoa, you clicked too much!".to_string()
            } else {
                format!("Click count: {times_clicked}")
            },
            label(self.uncontrolled.on()),
        );
    }
}

fn main() -> flipswitch::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Control Props ===\n");
    let app = App::new();
    app.render();

    println!("\n1. Clicking the bound toggles seven times");
    for click in 0..7 {
        app.click(&app.controlled[click % 2])?;
        app.render();
    }

    println!("\n2. Reset");
    app.reset();
    app.render();

    println!("\n3. Clicking the uncontrolled toggle");
    app.click(&app.uncontrolled)?;
    app.render();

    println!("\n4. Dropping control from a bound toggle");
    app.controlled[0].update(ToggleConfig::new());
    app.render();

    println!("\n✓ Done!");
    Ok(())
}
