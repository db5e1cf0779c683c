use crate::core::{ProcessId, ProcessRecord, SimError, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Result<Self, SimError> {
        if burst_time == 0 {
            return Err(SimError::InvalidProcess {
                id,
                reason: "burst time must be > 0".to_string(),
            });
        }

        Ok(Self {
            id,
            arrival_time,
            burst_time,
        })
    }

    pub fn from_signed(id: ProcessId, arrival_time: i64, burst_time: i64) -> Option<Self> {
        let arrival_time = Ticks::try_from(arrival_time).ok()?;
        let burst_time = Ticks::try_from(burst_time).ok()?;
        Self::new(id, arrival_time, burst_time).ok()
    }
}

impl From<Process> for ProcessRecord {
    fn from(p: Process) -> Self {
        ProcessRecord::new(p.id, p.arrival_time, p.burst_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_burst_is_rejected() {
        assert!(matches!(
            Process::new(3, 0, 0),
            Err(SimError::InvalidProcess { id: 3, .. })
        ));
    }

    #[test]
    fn signed_fields_are_range_checked() {
        assert!(Process::from_signed(1, -1, 4).is_none());
        assert!(Process::from_signed(1, 0, 0).is_none());
        assert!(Process::from_signed(1, 0, -2).is_none());
        assert_eq!(
            Process::from_signed(-5, 2, 4),
            Some(Process {
                id: -5,
                arrival_time: 2,
                burst_time: 4
            })
        );
    }
}
