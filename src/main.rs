//! Fixed-parameter demonstration run.
//!
//! No arguments. Five philosophers, three meals each, eating and sleeping
//! 2000ms with a 1000ms starvation deadline — eating takes twice the
//! deadline, so this run always ends with a starvation death shortly after
//! the first second. Death is reported in the narration and the summary;
//! the exit status is always 0.

use std::sync::Arc;
use std::time::Duration;

use tablevisor::{ConsoleNarrator, SimConfig, SimReport, Simulation, Subscribe};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cfg = SimConfig::default();

    println!("=== DINING PHILOSOPHERS ===");
    println!(
        "philosophers: {}, target meals: {}",
        cfg.seats, cfg.target_meals
    );
    println!(
        "eating: {}ms, sleeping: {}ms, starvation deadline: {}ms",
        cfg.eat_for.as_millis(),
        cfg.sleep_for.as_millis(),
        cfg.starve_after.as_millis()
    );
    println!();

    let seats = cfg.seats;
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(ConsoleNarrator::new())];
    let sim = Simulation::new(cfg, subs);

    match sim.run().await {
        Ok(report) => {
            // Let the narration queue drain before the summary block.
            tokio::time::sleep(Duration::from_millis(50)).await;
            print_summary(seats, &report);
        }
        Err(err) => {
            println!("simulation failed: {err}");
        }
    }
}

fn print_summary(seats: usize, report: &SimReport) {
    println!();
    println!("=== SIMULATION RESULTS ===");
    println!("total philosophers: {seats}");
    println!("survivors: {}", report.survivors());
    println!("deaths: {}", report.deaths());
    println!("total simulation time: {}ms", report.elapsed.as_millis());
    if report.deaths() > 0 {
        println!("some philosophers starved to death");
    } else {
        println!("all philosophers survived");
    }
}
