//! Paced Tween Demo
//!
//! Runs a small composition on the wall clock and logs every value.
//!
//! Run with: cargo run -p tweenery_animation --example paced_demo

use std::rc::Rc;

use tweenery_animation::{
    merge_all, run, sequence, Direction, Easing, PacedFrameHost, Result, Tween, TweenPreset,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let fade = Tween::builder_with_meta("opacity")
        .config(TweenPreset::fade_in(400.0))
        .on_change(|value, name| tracing::info!(value, "{name}"))
        .build();

    let slide = sequence(vec![
        Tween::builder_with_meta("x")
            .range(0.0, 120.0)
            .duration(300.0)
            .ease(Easing::EaseInOutQuint)
            .on_change(|value, name| tracing::info!(value, "{name}"))
            .build(),
        Tween::builder_with_meta("y")
            .range(0.0, 40.0)
            .iterations(2)
            .direction(Direction::ALTERNATE)
            .on_loop(|value, name| tracing::info!(value, "{name} turned"))
            .on_change(|value, name| tracing::info!(value, "{name}"))
            .build(),
    ])?;

    let host = Rc::new(PacedFrameHost::new());
    host.set_target_fps(60);

    let subscription = run(merge_all(vec![fade, slide])?, host.clone());
    let frames = host.run_until_idle(600);
    tracing::info!(frames, completed = subscription.is_completed(), "demo finished");

    Ok(())
}
