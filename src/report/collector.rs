/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::warn;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::passenger::PassengerRecord;
use crate::shared::ReportError;

/// Min, average and max over a set of simulated durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub min: u64,
    pub avg: u64,
    pub max: u64,
}

impl TimeStats {
    fn from_times(times: &[u64]) -> Option<TimeStats> {
        let min = *times.iter().min()?;
        let max = *times.iter().max()?;
        let avg = times.iter().sum::<u64>() / times.len() as u64;
        Some(TimeStats { min, avg, max })
    }
}

/**
 * Collects one record per delivered passenger and summarises them.
 *
 * Wait times are grouped by source floor, ride times by (source, destination).
 */
pub struct ReportCollector {
    n_floors: u32,
    records: Vec<PassengerRecord>,
    wait_times: Vec<Vec<u64>>,
    ride_times: Vec<Vec<Vec<u64>>>,
}

impl ReportCollector {
    pub fn new(n_floors: u32) -> ReportCollector {
        let n = n_floors as usize;
        ReportCollector {
            n_floors,
            records: Vec::new(),
            wait_times: vec![Vec::new(); n],
            ride_times: vec![vec![Vec::new(); n]; n],
        }
    }

    pub fn add(&mut self, record: PassengerRecord) -> Result<(), ReportError> {
        self.validate(&record)?;

        let from = (record.source - 1) as usize;
        let to = (record.destination - 1) as usize;
        self.wait_times[from].push(record.wait_time);
        self.ride_times[from][to].push(record.ride_time);
        self.records.push(record);
        Ok(())
    }

    /// Takes every record currently queued on `report_rx`. Invalid ones are logged
    /// and skipped.
    pub fn drain(&mut self, report_rx: &cbc::Receiver<PassengerRecord>) -> usize {
        let mut added = 0;
        for record in report_rx.try_iter() {
            match self.add(record) {
                Ok(()) => added += 1,
                Err(e) => warn!("{}", e),
            }
        }
        added
    }

    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn wait_stats(&self, floor: u32) -> Option<TimeStats> {
        let times = self.wait_times.get(floor.checked_sub(1)? as usize)?;
        TimeStats::from_times(times)
    }

    pub fn ride_stats(&self, from: u32, to: u32) -> Option<TimeStats> {
        let row = self.ride_times.get(from.checked_sub(1)? as usize)?;
        let times = row.get(to.checked_sub(1)? as usize)?;
        TimeStats::from_times(times)
    }

    /// Renders the three report tables as plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{:>40}", "Wait Times by Floor");
        let _ = writeln!(
            out,
            "{:>15} {:>15} {:>15} {:>15}",
            "Floor", "Avg Wait Time", "Min Wait Time", "Max Wait Time"
        );
        for floor in 1..=self.n_floors {
            match self.wait_stats(floor) {
                Some(s) => {
                    let _ = writeln!(
                        out,
                        "{:>15} {:>15} {:>15} {:>15}",
                        floor,
                        format!("{} sec", s.avg),
                        format!("{} sec", s.min),
                        format!("{} sec", s.max)
                    );
                }
                None => {
                    let _ = writeln!(out, "{:>15} {:>15} {:>15} {:>15}", floor, "n/a", "n/a", "n/a");
                }
            }
        }
        out.push('\n');

        let _ = writeln!(out, "{:>40}", "Average Ride Times from Floor to Floor");
        for from in 1..=self.n_floors {
            for to in 1..=self.n_floors {
                match self.ride_stats(from, to) {
                    Some(s) => {
                        let _ = write!(out, "{:>8} ", s.avg);
                    }
                    None => {
                        let _ = write!(out, "{:>8} ", "n/a");
                    }
                }
            }
            out.push('\n');
        }
        out.push('\n');

        let _ = writeln!(out, "{:>40}", "Wait and Ride Times by Person");
        let _ = writeln!(
            out,
            "{:>15} {:>15} {:>15} {:>15} {:>15}",
            "Person", "Wait Time", "Start Floor", "Dest Floor", "Ride Time"
        );
        let mut records: Vec<&PassengerRecord> = self.records.iter().collect();
        records.sort_by_key(|r| r.id);
        for r in records {
            let _ = writeln!(
                out,
                "{:>15} {:>15} {:>15} {:>15} {:>15}",
                r.id, r.wait_time, r.source, r.destination, r.ride_time
            );
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json)
    }

    fn validate(&self, record: &PassengerRecord) -> Result<(), ReportError> {
        let reason = if record.id == 0 {
            Some("id must be positive".to_string())
        } else if record.ride_time == 0 {
            Some("ride time must be positive".to_string())
        } else if record.source < 1 || record.source > self.n_floors {
            Some(format!("start floor {} outside of building", record.source))
        } else if record.destination < 1 || record.destination > self.n_floors {
            Some(format!("destination floor {} outside of building", record.destination))
        } else if self.records.iter().any(|r| r.id == record.id) {
            Some("already reported".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ReportError::InvalidRecord {
                id: record.id,
                reason,
            }),
            None => Ok(()),
        }
    }
}
