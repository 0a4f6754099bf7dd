//! Benchmarks for dispatch and decoration hot paths
//!
//! Run with: cargo bench traversal

use sidestep::config::ClusterConfig;
use sidestep::messages::{Direction, Msg};
use sidestep::model::Session;
use sidestep::update::update;
use std::num::NonZeroUsize;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn session(widgets: usize) -> Session {
    let config = ClusterConfig {
        widget_count: NonZeroUsize::new(widgets).unwrap(),
        ..ClusterConfig::default()
    };
    let mut session = Session::new(config).unwrap();
    let anchor = session.cluster().anchor_pos;
    update(&mut session, Msg::SetCursorPosition(anchor));
    session
}

// ============================================================================
// Dispatch
// ============================================================================

#[divan::bench(args = [1, 8, 64])]
fn cross_cluster_and_back(bencher: divan::Bencher, widgets: usize) {
    bencher.with_inputs(|| session(widgets)).bench_local_values(|mut session| {
        for _ in 0..=widgets {
            update(&mut session, Msg::MoveCursor(Direction::Right));
        }
        for _ in 0..=widgets {
            update(&mut session, Msg::MoveCursor(Direction::Left));
        }
        divan::black_box(session.offset())
    });
}

// ============================================================================
// Decorations
// ============================================================================

#[divan::bench(args = [1, 8, 64])]
fn decorations(bencher: divan::Bencher, widgets: usize) {
    let session = session(widgets);
    bencher.bench_local(|| divan::black_box(session.decorations()));
}

#[divan::bench(args = [1, 8, 64])]
fn render(bencher: divan::Bencher, widgets: usize) {
    let session = session(widgets);
    bencher.bench_local(|| divan::black_box(session.render()));
}
