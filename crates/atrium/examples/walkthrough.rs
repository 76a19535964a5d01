//! Headless interaction walkthrough.
//!
//! Drives a [`Desktop`] the way a windowed host would: scripted mouse and
//! keyboard input goes in, widget reactions come back out as [`UiEvent`]s,
//! and the final frame is recorded into an inspectable display list. No
//! window or GPU is involved, which is exactly how the toolkit is meant to
//! be embedded and tested.
//!
//! Run with: cargo run -p atrium --example walkthrough
//!
//! Toolkit logs are on the `tracing` crate; raise the filter to watch the
//! router work: RUST_LOG=atrium=trace cargo run -p atrium --example walkthrough

use std::time::Duration;

use atrium::prelude::*;
use atrium_core::WidgetTreeDebug;

/// Advance the desktop clock by one scripted step.
fn tick(desktop: &mut Desktop, clock: &mut Duration) {
    *clock += Duration::from_millis(100);
    desktop.begin_frame(*clock);
}

/// Print everything the widgets produced during a step.
fn drain(desktop: &mut Desktop, step: &str) {
    println!("\n== {step}");
    while let Some(event) = desktop.poll_event() {
        println!("   {event:?}");
    }
}

fn main() -> Result<(), WidgetError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut desktop = Desktop::new(Size::new(480.0, 360.0));
    let root = desktop.root();

    // A draggable panel: the grip strip at the top doubles as the title bar.
    // The title label is attached first so it sits in front of the grip, but
    // labels ignore hit-testing, so drags still land on the grip.
    let mut panel = Container::new();
    panel.set_geometry(Rect::new(20.0, 20.0, 300.0, 320.0));
    let panel = desktop.spawn(panel, "panel");
    desktop.attach(panel, root)?;

    let mut title = Label::new("Atrium walkthrough");
    title.set_geometry(Rect::new(8.0, 2.0, 160.0, 14.0));
    let title = desktop.spawn(title, "title");
    desktop.attach(title, panel)?;

    let mut grip = MoveButton::new();
    grip.set_geometry(Rect::new(0.0, 0.0, 300.0, 18.0));
    let grip = desktop.spawn(grip, "grip");
    desktop.attach(grip, panel)?;
    desktop
        .tree_mut()
        .widget_mut(grip)?
        .widget_base_mut()
        .set_owner(Some(panel));

    let mut name = TextBox::new().with_text("Ada");
    name.set_geometry(Rect::new(10.0, 30.0, 180.0, 22.0));
    let name = desktop.spawn(name, "name");
    desktop.attach(name, panel)?;

    let mut apply = TextButton::new("Apply");
    apply.set_geometry(Rect::new(10.0, 60.0, 90.0, 24.0));
    let apply = desktop.spawn(apply, "apply");
    desktop.attach(apply, panel)?;

    let mut list = ListBoxText::new().with_items([
        "Boole", "Hopper", "Kay", "Knuth", "Lamport", "Liskov", "Ritchie", "Turing",
    ]);
    list.set_geometry(Rect::new(10.0, 94.0, 180.0, 90.0));
    let list = desktop.spawn(list, "pioneers");
    desktop.attach(list, panel)?;

    let combo = ComboBox::spawn(&mut desktop, "font", ["Mono", "Serif", "Sans"])?;
    desktop
        .tree_mut()
        .widget_mut(combo)?
        .widget_base_mut()
        .set_geometry(Rect::new(10.0, 194.0, 150.0, 22.0));
    desktop.attach(combo, panel)?;

    let mut hscroll = ScrollBar::new(Orientation::Horizontal).with_jump_amount(24.0);
    hscroll.set_range(600.0);
    hscroll.set_active_range(180.0);
    hscroll.set_geometry(Rect::new(10.0, 226.0, 180.0, 16.0));
    let hscroll = desktop.spawn(hscroll, "hscroll");
    desktop.attach(hscroll, panel)?;

    let mut renderer = DisplayListRenderer::default();
    let mut clock = Duration::ZERO;

    // Click the Apply button. Press focuses it, release inside produces the
    // click.
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(75.0, 92.0))?;
    desktop.mouse_press(MouseButton::Left)?;
    desktop.mouse_release(MouseButton::Left)?;
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "click the apply button");

    // Click into the name box and finish the name. Enter commits the value.
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(120.0, 61.0))?;
    desktop.mouse_press(MouseButton::Left)?;
    desktop.mouse_release(MouseButton::Left)?;
    desktop.key_press(Key::Space)?;
    desktop.key_release(Key::Space);
    desktop.key_press(Key::ShiftLeft)?;
    desktop.key_press(Key::L)?;
    desktop.key_release(Key::L);
    desktop.key_release(Key::ShiftLeft);
    for key in [Key::O, Key::V, Key::E, Key::L, Key::A, Key::C, Key::E] {
        desktop.key_press(key)?;
        desktop.key_release(key);
    }
    desktop.key_press(Key::Enter)?;
    desktop.key_release(Key::Enter);
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "type into the name box and commit");
    println!("   name box now reads {:?}", desktop.typed::<TextBox>(name)?.text());

    // Tab moves focus to the next sibling that is a tab stop.
    tick(&mut desktop, &mut clock);
    desktop.key_press(Key::Tab)?;
    desktop.key_release(Key::Tab);
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "tab to the next stop");

    // Wheel scrolling goes to whatever is under the cursor, focused or not.
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(120.0, 160.0))?;
    desktop.wheel(-1.0)?;
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "wheel over the list");

    // Open the combo's menu, then pick the second entry from the popup.
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(105.0, 225.0))?;
    desktop.mouse_press(MouseButton::Left)?;
    desktop.mouse_release(MouseButton::Left)?;
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "open the font menu");

    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(80.0, 264.0))?;
    desktop.mouse_press(MouseButton::Left)?;
    desktop.mouse_release(MouseButton::Left)?;
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "pick a font from the menu");
    println!(
        "   combo selection is {:?}",
        desktop.typed::<ComboBox>(combo)?.selected_value()
    );

    // Drag the panel by its grip. The grip reports window-space deltas to
    // its owner, and the container follows them.
    let before = desktop.tree().widget(panel)?.pos();
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(170.0, 29.0))?;
    desktop.mouse_press(MouseButton::Left)?;
    tick(&mut desktop, &mut clock);
    desktop.mouse_move(Point::new(200.0, 60.0))?;
    desktop.mouse_release(MouseButton::Left)?;
    desktop.draw(&mut renderer)?;
    drain(&mut desktop, "drag the panel by its grip");
    let after = desktop.tree().widget(panel)?.pos();
    println!("   panel moved from {:?} to {:?}", before, after);

    // Record one more frame and inspect what a host would actually paint.
    tick(&mut desktop, &mut clock);
    let stats = desktop.draw(&mut renderer)?;
    let frame = renderer.finish().expect("draw pass leaves the frame closed");

    println!("\n== final frame");
    println!("   {} draw calls, {} culled by clipping", stats.draw_calls, stats.culled);
    println!("   text runs in paint order: {:?}", frame.text_runs().collect::<Vec<_>>());

    println!("\n== widget tree");
    print!("{}", WidgetTreeDebug::new().format_subtree(desktop.tree().registry(), root)?);

    Ok(())
}
