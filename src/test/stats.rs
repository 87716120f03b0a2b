use crate::queueing::{
    Discipline, Job, JobId, QueueConfig, QueueSim, QueueStats, ReportError, Server, ServerId,
    theory,
};
use crate::sim::SimTime;

#[test]
fn averages_over_zero_completions_are_reported_as_degenerate() {
    let stats = QueueStats::default();
    assert_eq!(stats.mean_time_in_system(), Err(ReportError::NoCompletions));
    assert_eq!(stats.miss_rate(), Err(ReportError::NoCompletions));
    assert_eq!(stats.tail_fractions(3), Err(ReportError::NoObservations));
}

#[test]
fn completion_bookkeeping_counts_misses() {
    let mut stats = QueueStats::default();
    let on_time = Job::new(JobId(0), SimTime::new(1.0)).with_deadline(2.0, 2.0); // deadline 5
    let late = Job::new(JobId(1), SimTime::new(2.0)).with_deadline(1.0, 1.0); // deadline 3
    stats.record_arrival(&on_time);
    stats.record_arrival(&late);

    assert!(!stats.record_completion(&on_time, SimTime::new(5.0)));
    assert!(stats.record_completion(&late, SimTime::new(4.0)));

    assert_eq!(stats.deadline_misses, 1);
    assert_eq!(stats.completed(), 2);
    assert_eq!(stats.mean_time_in_system(), Ok(3.0));
    assert_eq!(stats.miss_rate(), Ok(0.5));
    assert_eq!(stats.service_times[&JobId(1)], 1.0);
}

#[test]
fn tail_fractions_accumulate_from_the_histogram() {
    let mut stats = QueueStats::default();
    let mut servers: Vec<Server> = (0..4)
        .map(|i| Server::new(ServerId(i), Discipline::Fifo))
        .collect();
    servers[1].running = Some(JobId(0));
    servers[2].running = Some(JobId(1));
    servers[2].pending.enqueue(&Job::new(JobId(2), SimTime::ZERO));
    stats.observe(&servers);

    assert_eq!(stats.state_changes, 1);
    assert_eq!(stats.observations(), 4);
    assert_eq!(stats.queue_lengths.get(&0), Some(&2));
    assert_eq!(stats.tail_fractions(3), Ok(vec![0.5, 0.25, 0.0]));
}

#[test]
fn theory_reference_values() {
    assert_eq!(theory::mm1_time_in_system(0.5, 1.0), Some(2.0));
    assert_eq!(theory::mm1_time_in_system(1.0, 1.0), None);
    assert!((theory::supermarket_tail(0.5, 1, 3) - 0.125).abs() < 1e-12);
    // d = 2: lambda^(2^i - 1)
    assert!((theory::supermarket_tail(0.5, 2, 1) - 0.5).abs() < 1e-12);
    assert!((theory::supermarket_tail(0.5, 2, 2) - 0.125).abs() < 1e-12);
    assert!((theory::supermarket_tail(0.5, 2, 3) - 0.5f64.powi(7)).abs() < 1e-12);
}

#[test]
fn measured_tail_tracks_the_supermarket_prediction() {
    let cfg = QueueConfig {
        lambda: 0.7,
        mu: 1.0,
        max_time: 5_000.0,
        servers: 50,
        choices: 2,
        ..QueueConfig::default()
    };
    let mut sim = QueueSim::new(cfg).expect("valid");
    sim.run();
    let tails = sim.stats().tail_fractions(3).expect("observed");
    for (i, measured) in tails.iter().enumerate() {
        let expected = theory::supermarket_tail(0.7, 2, i as u32 + 1);
        assert!(
            (measured - expected).abs() < 0.05,
            "len>={}: measured {measured} expected {expected}",
            i + 1
        );
    }
}

#[test]
fn report_serializes_for_downstream_consumers() {
    let cfg = QueueConfig {
        lambda: 0.6,
        max_time: 200.0,
        servers: 3,
        choices: 2,
        deadline_mode: true,
        ..QueueConfig::default()
    };
    let mut sim = QueueSim::new(cfg).expect("valid");
    sim.run();
    let report = sim.report();
    assert_eq!(report.jobs_completed, sim.stats().completed());
    assert_eq!(
        report.jobs_arrived,
        report.jobs_completed + report.jobs_in_system
    );
    assert!(report.deadline_misses.is_some());

    let json: serde_json::Value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(json["config"]["servers"], 3);
    assert_eq!(json["config"]["discipline"], "fifo");
    assert!(json["queue_lengths"].as_object().is_some_and(|m| !m.is_empty()));
    assert!(json["mean_time_in_system"].as_f64().is_some());
}
