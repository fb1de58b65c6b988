// Log output of plan build, pass tracing and release. One test per binary:
// the logger and the environment are process-global.
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use mixfft::{Complex64, FftDirection, FftPlanner, PlanOptions};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        if record.target().starts_with("mixfft") {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }
    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn take_records() -> Vec<(Level, String)> {
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

fn run(options: PlanOptions, n: usize) {
    let mut planner = FftPlanner::<f64>::with_options(options);
    let mut plan = planner.plan(n, FftDirection::Forward).unwrap();
    let mut input = vec![Complex64::zero(); n];
    input[0] = Complex64::new(1.0, 0.0);
    let mut output = vec![Complex64::zero(); n];
    plan.execute(&input, &mut output).unwrap();
}

#[test]
fn plan_logging() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    // Tracing off: build and release only.
    run(PlanOptions::default(), 6);
    let records = take_records();
    assert!(records.iter().all(|(level, _)| *level == Level::Debug));
    assert!(records
        .iter()
        .any(|(_, msg)| msg.starts_with("mixed-radix plan n=6 p=3 q=2")));
    assert!(records
        .iter()
        .any(|(_, msg)| msg.starts_with("releasing mixed-radix plan n=6")));

    // Tracing on: one row per column of pass 1 and per row of pass 2.
    run(PlanOptions::default().with_trace_passes(true), 6);
    let traces: Vec<String> = take_records()
        .into_iter()
        .filter(|(level, _)| *level == Level::Trace)
        .map(|(_, msg)| msg)
        .collect();
    assert_eq!(traces.iter().filter(|m| m.contains("pass 1")).count(), 2);
    assert_eq!(traces.iter().filter(|m| m.contains("pass 2")).count(), 3);

    // Sub-plans inherit the option: 12 = 6 * 2 and 6 = 3 * 2.
    run(PlanOptions::default().with_trace_passes(true), 12);
    let traces = take_records()
        .into_iter()
        .filter(|(level, _)| *level == Level::Trace)
        .count();
    assert_eq!(traces, (2 + 6) + 2 * (2 + 3));

    // The option can come from the environment.
    std::env::set_var("MIXFFT_TRACE_PASSES", "on");
    assert!(PlanOptions::from_env().trace_passes);
    std::env::set_var("MIXFFT_TRACE_PASSES", "TRUE");
    assert!(PlanOptions::from_env().trace_passes);
    std::env::set_var("MIXFFT_TRACE_PASSES", "0");
    assert!(!PlanOptions::from_env().trace_passes);
    std::env::remove_var("MIXFFT_TRACE_PASSES");
    assert_eq!(PlanOptions::from_env(), PlanOptions::default());
}
