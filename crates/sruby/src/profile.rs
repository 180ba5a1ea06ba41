use std::{
    io::Write,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// Profiler
// ---------------------------------------------------------------------------

/// Records how long each stage of a run takes.
///
/// A disabled profiler runs the stages without timing them and reports
/// nothing.
#[derive(Debug, Default)]
pub struct Profiler {
    stages: Option<Vec<(&'static str, Duration)>>,
}

impl Profiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            stages: enabled.then(|| Vec::with_capacity(8)),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.stages.is_some()
    }

    #[inline]
    pub fn time<F, R>(&mut self, stage: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        match &mut self.stages {
            None => f(),
            Some(stages) => {
                let start = Instant::now();
                let result = f();
                let elapsed = start.elapsed();
                log::debug!("{stage} took {elapsed:?}");
                stages.push((stage, elapsed));
                result
            }
        }
    }

    pub fn report<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let Some(stages) = &self.stages else {
            return Ok(());
        };
        let width = stages
            .iter()
            .map(|(s, _)| s.len())
            .chain(std::iter::once("Total".len()))
            .max()
            .unwrap_or(0);
        let separator = "-".repeat(width + 28);
        let total: Duration = stages.iter().map(|(_, d)| *d).sum();
        writeln!(writer, "{separator}")?;
        writeln!(writer, "Profiler Report")?;
        writeln!(writer, "{separator}")?;
        for (stage, duration) in stages {
            let percentage = match total.as_nanos() {
                0 => 0.0,
                _ => duration.as_secs_f64() / total.as_secs_f64() * 100.0,
            };
            writeln!(
                writer,
                "{:<width$} : {:>10.4}ms ({:>5.1}%)",
                stage,
                millis(*duration),
                percentage,
            )?;
        }
        writeln!(writer, "{separator}")?;
        writeln!(
            writer,
            "{:<width$} : {:>10.4}ms (100.0%)",
            "Total",
            millis(total),
        )?;
        writeln!(writer, "{separator}")
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}
