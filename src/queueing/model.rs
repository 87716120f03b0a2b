//! 多队列调度模型
//!
//! 到达事件按 power-of-d 选服务器；完成事件从该服务器的等待队列中取下一个作业。

use std::collections::HashMap;
use tracing::{debug, trace};

use super::dispatch::pick_server;
use super::{
    ConfigError, Job, JobId, QueueConfig, QueueEvent, QueueStats, Server, ServerId, ValidConfig,
    Workload,
};
use crate::sim::{SimRng, Simulator, World};

/// n 个服务器、各自一个等待队列的仿真状态。
#[derive(Debug)]
pub struct QueueModel {
    cfg: QueueConfig,
    servers: Vec<Server>,
    /// 尚未完成的作业（运行中或等待中）
    active: HashMap<JobId, Job>,
    workload: Workload,
    rng: SimRng,
    stats: QueueStats,
}

impl QueueModel {
    pub fn new(valid: &ValidConfig) -> Result<Self, ConfigError> {
        let cfg = valid.config().clone();
        let servers = (0..cfg.servers)
            .map(|i| Server::new(ServerId(i), cfg.discipline))
            .collect();
        Ok(Self {
            workload: Workload::new(&cfg)?,
            rng: SimRng::new(cfg.seed),
            servers,
            active: HashMap::new(),
            stats: QueueStats::default(),
            cfg,
        })
    }

    /// 调度第一个到达事件。
    pub fn start(&mut self, sim: &mut Simulator<QueueEvent>) {
        let delay = self.workload.interarrival(&mut self.rng);
        sim.schedule(delay, QueueEvent::Arrival { job: JobId(0) });
    }

    pub fn config(&self) -> &QueueConfig {
        &self.cfg
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.active.get(&id)
    }

    /// 系统中尚未完成的作业数
    pub fn in_system(&self) -> usize {
        self.active.len()
    }

    fn on_arrival(&mut self, id: JobId, sim: &mut Simulator<QueueEvent>) {
        let now = sim.now();
        let mut job = Job::new(id, now);
        if self.cfg.deadline_mode {
            let service = self.workload.service(&mut self.rng);
            job = job.with_deadline(service, self.cfg.slack_margin);
        }
        self.stats.record_arrival(&job);

        let server = pick_server(&self.servers, self.cfg.choices, &mut self.rng);
        let idle = self.servers[server.0].is_idle();
        debug!(%now, job = %id, %server, idle, deadline = ?job.deadline, "作业到达");

        if idle {
            self.servers[server.0].running = Some(id);
            self.active.insert(id, job);
            self.start_service(id, server, sim);
        } else {
            self.servers[server.0].pending.enqueue(&job);
            self.active.insert(id, job);
        }

        self.stats.observe(&self.servers);

        let delay = self.workload.interarrival(&mut self.rng);
        sim.schedule(delay, QueueEvent::Arrival { job: id.next() });
    }

    fn on_completion(&mut self, id: JobId, server: ServerId, sim: &mut Simulator<QueueEvent>) {
        let now = sim.now();
        let running = self.servers[server.0].running;
        assert_eq!(
            running,
            Some(id),
            "completion of {id} on {server} does not match the running job"
        );
        let job = self
            .active
            .remove(&id)
            .expect("running job must be tracked as active");
        let missed = self.stats.record_completion(&job, now);
        debug!(%now, job = %id, %server, time_in_system = now.since(job.arrival), missed, "作业完成");

        match self.servers[server.0].pending.dequeue() {
            Some(next) => {
                self.servers[server.0].running = Some(next);
                self.start_service(next, server, sim);
            }
            None => self.servers[server.0].running = None,
        }

        self.stats.observe(&self.servers);
    }

    /// 作业开始运行：必要时抽取服务时长，并调度完成事件。
    fn start_service(&mut self, id: JobId, server: ServerId, sim: &mut Simulator<QueueEvent>) {
        let job = self
            .active
            .get_mut(&id)
            .expect("job must be active before it starts");
        let service = match job.service {
            Some(service) => service,
            None => {
                let service = self.workload.service(&mut self.rng);
                job.service = Some(service);
                self.stats.record_service(id, service);
                service
            }
        };
        trace!(job = %id, %server, service, "开始服务");
        sim.schedule(service, QueueEvent::Completion { job: id, server });
    }
}

impl World for QueueModel {
    type Event = QueueEvent;

    fn process(&mut self, ev: QueueEvent, sim: &mut Simulator<QueueEvent>) {
        match ev {
            QueueEvent::Arrival { job } => self.on_arrival(job, sim),
            QueueEvent::Completion { job, server } => self.on_completion(job, server, sim),
        }
    }

    fn on_tick(&mut self, _sim: &mut Simulator<QueueEvent>) {
        // 每个未完成作业恰好占据一个服务器的运行位或等待队列。
        debug_assert_eq!(
            self.servers.iter().map(Server::queue_len).sum::<usize>(),
            self.active.len(),
            "active jobs and server occupancy diverged"
        );
    }
}
