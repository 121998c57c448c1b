//! # Example: visit_events
//!
//! Wires a few side-effect modules to patient-visit events.
//!
//! Shows how to:
//! - Declare record events with [`impl_event!`].
//! - Register closures and a [`Subscribe`] implementation.
//! - Inspect the aggregated [`DispatchError`] returned by `publish`.
//! - Fire-and-forget with `publish_async`.
//!
//! ## Flow
//! ```text
//! VisitSubmitted ──► Dispatcher::publish()
//!     ├─► LogWriter            (tracing debug)
//!     ├─► DoctorQueue          (Subscribe impl, may fail)
//!     └─► notify closure       (may fail)
//!
//! RefillRequested ──► Dispatcher::publish_async() ──► blocking pool
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example visit_events --features logging
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use evdispatch::{
    impl_event, DispatchError, Dispatcher, LogWriter, Subscribe, SubscriberError,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct VisitSubmitted {
    visit_id: u64,
    patient_id: u64,
}

#[derive(Debug, Clone)]
struct RefillRequested {
    patient_id: u64,
    rx_id: u64,
}

impl_event!(VisitSubmitted, RefillRequested);

/// Keeps the doctor queue in sync with submitted visits.
#[derive(Default)]
struct DoctorQueue {
    pending: Mutex<Vec<u64>>,
}

impl Subscribe<VisitSubmitted> for DoctorQueue {
    fn on_event(&self, ev: &VisitSubmitted) -> Result<(), SubscriberError> {
        let mut pending = self.pending.lock().map_err(|e| e.to_string())?;
        if pending.contains(&ev.visit_id) {
            return Err(format!("visit {} already queued", ev.visit_id).into());
        }
        pending.push(ev.visit_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "doctor-queue"
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = Dispatcher::builder().with_name("visits").build();
    let queue = Arc::new(DoctorQueue::default());

    dispatcher.subscribe_ref::<VisitSubmitted>(Arc::new(LogWriter::new()));
    dispatcher.subscribe_ref::<VisitSubmitted>(queue.clone());
    dispatcher.subscribe(|ev: &VisitSubmitted| -> Result<(), SubscriberError> {
        if ev.patient_id == 0 {
            return Err("no patient contact on file".into());
        }
        println!("[notify] patient={} visit={}", ev.patient_id, ev.visit_id);
        Ok(())
    });

    dispatcher.subscribe(|ev: &RefillRequested| -> Result<(), SubscriberError> {
        println!("[refill] patient={} rx={}", ev.patient_id, ev.rx_id);
        Ok(())
    });

    // first submission: everyone succeeds
    dispatcher.publish(&VisitSubmitted {
        visit_id: 10,
        patient_id: 3,
    })?;

    // resubmission for an unknown patient: two failures, both reported
    let outcome = dispatcher.publish(&VisitSubmitted {
        visit_id: 10,
        patient_id: 0,
    });
    if let Err(err) = outcome {
        report(&err);
    }

    dispatcher.publish_async(RefillRequested {
        patient_id: 3,
        rx_id: 77,
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!("queued visits: {:?}", queue.pending.lock().map_err(|e| e.to_string())?);
    Ok(())
}

fn report(err: &DispatchError) {
    println!("[publish] {err}");
    for (i, e) in err.errors().iter().enumerate() {
        println!("  #{i}: {e}");
    }
}
