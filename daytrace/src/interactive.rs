//! Line-based prompts for the manual parts of a report
//!
//! [`Prompter`] reads answers from any `BufRead` and writes questions to any
//! `Write`, so the whole flow runs against in-memory buffers in tests. End of
//! input is reported as `UnexpectedEof` rather than looping on re-asks.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use daytrace_core::format::format_hours;
use daytrace_core::manual::{
    parse_hours, Blocker, BlockerKind, BlockerStatus, Blockers, CodeReview, CodeReviews,
    ManualData, PlannedTask, Priority, ReviewKind, ReviewOutcome, TimeCategory, TimeEntry,
    LONG_DAY_HOURS,
};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;
        self.read_answer()
    }

    /// Yes/no question. A blank answer takes `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{} {}", question, hint))?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    /// Free text that must not be blank.
    pub fn text(&mut self, question: &str, empty_hint: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "{}", empty_hint)?;
        }
    }

    /// Free text with an optional current value that a blank answer keeps.
    pub fn text_or(
        &mut self,
        question: &str,
        current: Option<&str>,
        empty_hint: &str,
    ) -> io::Result<String> {
        let current = current.filter(|c| !c.is_empty());
        loop {
            let answer = match current {
                Some(c) => self.ask(&format!("{} [{}]", question, c))?,
                None => self.ask(question)?,
            };
            match (answer.is_empty(), current) {
                (false, _) => return Ok(answer),
                (true, Some(c)) => return Ok(c.to_string()),
                (true, None) => writeln!(self.output, "{}", empty_hint)?,
            }
        }
    }

    /// Free text where a blank answer means "nothing".
    pub fn optional_text(&mut self, question: &str) -> io::Result<Option<String>> {
        let answer = self.ask(question)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Pick one of `options` by number. A blank answer takes `options[default]`.
    pub fn select<T: Copy + Display>(
        &mut self,
        question: &str,
        options: &[T],
        default: usize,
    ) -> io::Result<T> {
        writeln!(self.output, "{}", question)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }

        loop {
            let answer = self.ask(&format!("Choice [{}]:", default + 1))?;
            if answer.is_empty() {
                if let Some(option) = options.get(default) {
                    return Ok(*option);
                }
            }
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(options[n - 1]),
                _ => writeln!(self.output, "Please enter a number from 1 to {}.", options.len())?,
            }
        }
    }

    /// Hours between 0 and 24. A blank answer is 0.
    pub fn hours(&mut self, question: &str) -> io::Result<f64> {
        loop {
            let answer = self.ask(question)?;
            match parse_hours(&answer) {
                Ok(hours) => return Ok(hours),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Like [`Prompter::hours`], but a blank answer means no estimate.
    pub fn optional_hours(&mut self, question: &str) -> io::Result<Option<f64>> {
        loop {
            let answer = self.ask(question)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match parse_hours(&answer) {
                Ok(hours) => return Ok(Some(hours)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    // ============================================
    // Manual report sections
    // ============================================

    pub fn wants_manual_input(&mut self) -> io::Result<bool> {
        writeln!(
            self.output,
            "\n🤔 Would you like to add manual details to your report?"
        )?;
        writeln!(
            self.output,
            "This includes time allocation, code reviews, blockers, and tomorrow's plans.\n"
        )?;
        self.confirm("Add manual details?", true)
    }

    pub fn collect_manual_input(&mut self) -> io::Result<ManualData> {
        writeln!(self.output, "\n📝 Let's add some manual details to your report!\n")?;
        Ok(ManualData {
            time_allocation: self.collect_time_allocation()?,
            code_reviews: self.collect_code_reviews()?,
            blockers: self.collect_blockers()?,
            tomorrow_plans: self.collect_tomorrow_plans()?,
        })
    }

    fn collect_time_allocation(&mut self) -> io::Result<Vec<TimeEntry>> {
        writeln!(self.output, "⏰ Time Allocation (in hours)")?;
        writeln!(
            self.output,
            "Enter approximate hours spent on each activity today:\n"
        )?;

        let mut entries = Vec::with_capacity(TimeCategory::ALL.len());
        for category in TimeCategory::ALL {
            let hours = self.hours(&format!("{} [0]:", category))?;
            entries.push(TimeEntry {
                category: *category,
                hours,
            });
        }

        let total: f64 = entries.iter().map(|e| e.hours).sum();
        if total > 0.0 {
            writeln!(self.output, "\n📊 Total tracked time: {}", format_hours(total))?;
            if total > LONG_DAY_HOURS {
                writeln!(
                    self.output,
                    "⚠️  That's a lot of work! Make sure to take breaks."
                )?;
            }
        }

        Ok(entries)
    }

    fn collect_code_reviews(&mut self) -> io::Result<CodeReviews> {
        writeln!(self.output, "\n🔍 Code Reviews & Reviews Given")?;
        if !self.confirm("Did you participate in any code reviews today?", false)? {
            return Ok(CodeReviews::default());
        }

        let mut reviews = Vec::new();
        loop {
            let kind = self.select("Type of review:", ReviewKind::ALL, 0)?;
            let description = self.text(
                "Brief description (repo/PR name, what was reviewed):",
                "Please enter a description",
            )?;
            let outcome = self.select("Outcome:", ReviewOutcome::ALL, 0)?;
            reviews.push(CodeReview {
                kind,
                description,
                outcome,
            });

            if !self.confirm("Add another code review?", false)? {
                break;
            }
        }

        Ok(CodeReviews {
            participated: true,
            reviews,
        })
    }

    fn collect_blockers(&mut self) -> io::Result<Blockers> {
        writeln!(self.output, "\n🚧 Blockers & Challenges")?;
        if !self.confirm("Did you encounter any blockers or challenges today?", false)? {
            return Ok(Blockers::default());
        }

        let mut blockers = Vec::new();
        loop {
            let kind = self.select("Type of blocker:", BlockerKind::ALL, 0)?;
            let description = self.text("Describe the blocker:", "Please enter a description")?;
            let status = self.select("Current status:", BlockerStatus::ALL, 0)?;
            let next_steps = self.optional_text("Next steps to resolve (optional):")?;
            blockers.push(Blocker {
                kind,
                description,
                status,
                next_steps,
            });

            if !self.confirm("Add another blocker?", false)? {
                break;
            }
        }

        Ok(Blockers {
            had_blockers: true,
            blockers,
        })
    }

    fn collect_tomorrow_plans(&mut self) -> io::Result<Vec<PlannedTask>> {
        writeln!(self.output, "\n📅 Tomorrow's Plans")?;
        writeln!(self.output, "Add your planned tasks for tomorrow:\n")?;

        let mut plans = Vec::new();
        loop {
            let task = self.text("Planned task/goal:", "Please enter a task")?;
            // Medium is the second option
            let priority = self.select("Priority:", Priority::ALL, 1)?;
            let estimated_hours = self.optional_hours("Estimated time (hours, optional):")?;
            plans.push(PlannedTask {
                task,
                priority,
                estimated_hours,
            });

            if !self.confirm("Add another planned task?", true)? {
                break;
            }
        }

        Ok(plans)
    }
}
