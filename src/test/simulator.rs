use crate::sim::{SimTime, Simulator, World};

#[derive(Debug)]
enum TestEvent {
    Push(u32),
    PushThenScheduleNow { id: u32, next_id: u32 },
}

#[derive(Default)]
struct DummyWorld {
    ticks: usize,
    log: Vec<u32>,
    times: Vec<SimTime>,
}

impl World for DummyWorld {
    type Event = TestEvent;

    fn process(&mut self, ev: TestEvent, sim: &mut Simulator<TestEvent>) {
        self.times.push(sim.now());
        match ev {
            TestEvent::Push(id) => self.log.push(id),
            TestEvent::PushThenScheduleNow { id, next_id } => {
                self.log.push(id);
                sim.schedule(0.0, TestEvent::Push(next_id));
            }
        }
    }

    fn on_tick(&mut self, _sim: &mut Simulator<TestEvent>) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let mut sim = Simulator::default();
    sim.schedule(10.0, TestEvent::Push(1));
    sim.schedule(5.0, TestEvent::Push(2));
    sim.schedule(10.0, TestEvent::Push(3));
    sim.schedule_at(SimTime::new(5.0), TestEvent::Push(4));

    let mut world = DummyWorld::default();
    sim.run(&mut world);

    assert_eq!(world.log, [2, 4, 1, 3]);
    assert_eq!(world.ticks, 4);
    assert_eq!(sim.now(), SimTime::new(10.0));
    assert_eq!(sim.processed(), 4);
}

#[test]
fn equal_time_order_follows_insertion_for_many_events() {
    let mut sim = Simulator::default();
    for id in 0..100 {
        sim.schedule(1.0, TestEvent::Push(id));
    }
    let mut world = DummyWorld::default();
    sim.run(&mut world);
    assert_eq!(world.log, (0..100).collect::<Vec<_>>());
}

#[test]
fn event_scheduled_at_same_time_inside_event_runs_after_current_event() {
    let mut sim = Simulator::default();
    sim.schedule(0.0, TestEvent::PushThenScheduleNow { id: 1, next_id: 2 });
    sim.schedule(0.0, TestEvent::Push(3));

    let mut world = DummyWorld::default();
    sim.run(&mut world);

    assert_eq!(world.log, [1, 3, 2]);
    assert_eq!(world.ticks, 3);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn clock_never_goes_backwards() {
    let mut sim = Simulator::default();
    for (i, delay) in [3.0, 0.5, 7.25, 0.5, 2.0, 0.0].into_iter().enumerate() {
        sim.schedule(delay, TestEvent::Push(i as u32));
    }
    let mut world = DummyWorld::default();
    sim.run(&mut world);
    assert!(world.times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let mut sim = Simulator::default();
    sim.schedule(0.0, TestEvent::Push(1));
    sim.schedule(10.0, TestEvent::Push(2));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime::new(5.0), &mut world);

    assert_eq!(world.log, [1]);
    assert_eq!(world.ticks, 1);
    assert_eq!(sim.now(), SimTime::new(5.0));
    assert_eq!(sim.pending(), 1);

    sim.run(&mut world);
    assert_eq!(world.log, [1, 2]);
    assert_eq!(world.ticks, 2);
    assert_eq!(sim.now(), SimTime::new(10.0));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let mut sim = Simulator::default();
    sim.schedule(5.0, TestEvent::Push(1));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime::new(5.0), &mut world);

    assert_eq!(world.log, [1]);
    assert_eq!(sim.now(), SimTime::new(5.0));
}

#[test]
fn run_until_infinity_does_not_move_the_clock_past_the_last_event() {
    let mut sim = Simulator::default();
    sim.schedule(2.5, TestEvent::Push(1));

    let mut world = DummyWorld::default();
    sim.run_until(SimTime::INFINITY, &mut world);

    assert_eq!(world.log, [1]);
    assert_eq!(sim.now(), SimTime::new(2.5));
}

#[test]
#[should_panic(expected = "delay must be non-negative")]
fn negative_delay_is_a_contract_violation() {
    let mut sim: Simulator<TestEvent> = Simulator::default();
    sim.schedule(-1.0, TestEvent::Push(1));
}

#[test]
#[should_panic(expected = "delay must be non-negative and finite")]
fn infinite_delay_is_a_contract_violation() {
    let mut sim: Simulator<TestEvent> = Simulator::default();
    sim.schedule(f64::INFINITY, TestEvent::Push(1));
}

#[test]
#[should_panic(expected = "cannot schedule into the past")]
fn scheduling_before_now_is_a_contract_violation() {
    let mut sim = Simulator::default();
    sim.schedule(4.0, TestEvent::Push(1));
    let mut world = DummyWorld::default();
    sim.run(&mut world);
    sim.schedule_at(SimTime::new(1.0), TestEvent::Push(2));
}
