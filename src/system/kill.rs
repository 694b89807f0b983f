use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    Terminated(u32),
    NotFound(u32),
    PermissionDenied(u32),
}

/// Process lookup and termination as seen by the kill flow.
pub trait ProcessControl {
    /// Name of a live process, `None` once it is gone.
    fn resolve(&mut self, pid: u32) -> Option<String>;
    fn terminate(&mut self, pid: u32) -> KillOutcome;
}

pub fn terminate_process(sys: &System, pid: u32) -> KillOutcome {
    let Some(process) = sys.process(Pid::from_u32(pid)) else {
        return KillOutcome::NotFound(pid);
    };
    let sent = match process.kill_with(Signal::Term) {
        Some(sent) => sent,
        // SIGTERM is not supported on this platform, fall back to kill()
        None => process.kill(),
    };
    if sent {
        KillOutcome::Terminated(pid)
    } else {
        KillOutcome::PermissionDenied(pid)
    }
}

#[derive(Default)]
pub struct SysinfoProcesses {
    sys: System,
}

impl SysinfoProcesses {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(&mut self, pid: u32) {
        let pids = [Pid::from_u32(pid)];
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing(),
        );
    }
}

impl ProcessControl for SysinfoProcesses {
    fn resolve(&mut self, pid: u32) -> Option<String> {
        self.refresh(pid);
        self.sys
            .process(Pid::from_u32(pid))
            .map(|p| p.name().to_string_lossy().to_string())
    }

    fn terminate(&mut self, pid: u32) -> KillOutcome {
        self.refresh(pid);
        match terminate_process(&self.sys, pid) {
            KillOutcome::PermissionDenied(pid) => {
                // A refused signal on a process that exited meanwhile is not a denial.
                self.refresh(pid);
                if self.sys.process(Pid::from_u32(pid)).is_some() {
                    KillOutcome::PermissionDenied(pid)
                } else {
                    KillOutcome::NotFound(pid)
                }
            }
            outcome => outcome,
        }
    }
}
