//! CSV exports of final allocations and run metrics.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::model::Assignment;

/// One task of a finished assignment, flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllocationRecord {
    /// Machine ordinal, starting at 1.
    pub machine: usize,
    /// Processing time of the task.
    pub processing_time: u64,
}

/// Flattens an assignment into `(machine, processing time)` rows in
/// machine order, then task order.
pub fn allocation_records(assignment: &Assignment) -> Vec<AllocationRecord> {
    assignment
        .machines()
        .iter()
        .enumerate()
        .flat_map(|(i, m)| {
            m.tasks().iter().map(move |t| AllocationRecord {
                machine: i + 1,
                processing_time: t.processing_time(),
            })
        })
        .collect()
}

/// Writes the allocation of `assignment` as CSV with header
/// `Machine,TaskProcessingTime`.
pub fn write_allocation_csv<W: Write>(assignment: &Assignment, mut writer: W) -> Result<()> {
    writeln!(writer, "Machine,TaskProcessingTime")?;
    for record in allocation_records(assignment) {
        writeln!(writer, "{},{}", record.machine, record.processing_time)?;
    }
    writer.flush()?;
    Ok(())
}

/// Measurements of one strategy run on one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetricsRecord {
    /// Strategy name.
    pub strategy: String,
    /// Number of tasks (N).
    pub task_count: usize,
    /// Number of machines (M).
    pub machine_count: usize,
    /// Task/machine exponent the instance was generated with.
    pub ratio: f64,
    /// Replication number, starting at 1.
    pub replication: usize,
    /// Wall-clock time of the strategy call.
    pub elapsed: Duration,
    /// Relocations performed.
    pub moves: usize,
    /// Final makespan.
    pub makespan: u64,
    /// Strategy parameter, if any.
    pub parameter: Option<f64>,
}

/// Writes metrics as CSV with header
/// `Heuristic,N,M,Replication,Time,Iterations,Value,Parameter`.
///
/// `Time` is in seconds. A missing or zero parameter is written as `N/A`.
pub fn write_metrics_csv<W: Write>(records: &[MetricsRecord], mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "Heuristic,N,M,Replication,Time,Iterations,Value,Parameter"
    )?;
    for r in records {
        let parameter = match r.parameter {
            Some(p) if p != 0.0 => p.to_string(),
            _ => "N/A".to_string(),
        };
        writeln!(
            writer,
            "{},{},{},{},{:.6},{},{},{}",
            r.strategy,
            r.task_count,
            r.machine_count,
            r.replication,
            r.elapsed.as_secs_f64(),
            r.moves,
            r.makespan,
            parameter
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;

    fn finished() -> Assignment {
        Assignment::from_machines(vec![
            vec![Task::new(0, 7), Task::new(1, 3)],
            vec![],
            vec![Task::new(2, 12)],
        ])
        .unwrap()
    }

    fn record(parameter: Option<f64>) -> MetricsRecord {
        MetricsRecord {
            strategy: "best-improvement".into(),
            task_count: 31,
            machine_count: 10,
            ratio: 1.5,
            replication: 2,
            elapsed: Duration::from_millis(1500),
            moves: 40,
            makespan: 180,
            parameter,
        }
    }

    #[test]
    fn test_allocation_records_are_one_based() {
        let records = allocation_records(&finished());
        assert_eq!(
            records,
            vec![
                AllocationRecord { machine: 1, processing_time: 7 },
                AllocationRecord { machine: 1, processing_time: 3 },
                AllocationRecord { machine: 3, processing_time: 12 },
            ]
        );
    }

    #[test]
    fn test_allocation_csv() {
        let mut out = Vec::new();
        write_allocation_csv(&finished(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Machine,TaskProcessingTime\n1,7\n1,3\n3,12\n");
    }

    #[test]
    fn test_metrics_csv() {
        let mut out = Vec::new();
        write_metrics_csv(&[record(None), record(Some(0.1)), record(Some(0.0))], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Heuristic,N,M,Replication,Time,Iterations,Value,Parameter");
        assert_eq!(lines[1], "best-improvement,31,10,2,1.500000,40,180,N/A");
        assert_eq!(lines[2], "best-improvement,31,10,2,1.500000,40,180,0.1");
        assert!(lines[3].ends_with(",N/A"));
        assert_eq!(lines.len(), 4);
    }
}
