use crate::components::LectureTime;
use clap::Parser;

/// Conference check-in automation
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "checkin", version, about)]
pub struct Args {
    /// Lecture time to check in for
    #[arg(long, value_enum)]
    pub time: LectureTime,

    /// Fill the form but don't submit (shows the browser)
    #[arg(long)]
    pub dry_run: bool,

    /// Submit even if the calendar says there is no conference
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_labels() {
        let args = Args::try_parse_from(["checkin", "--time", "8AM"]).unwrap();
        assert_eq!(args.time, LectureTime::Morning);
        assert!(!args.dry_run);
        assert!(!args.force);

        let args = Args::try_parse_from(["checkin", "--time", "12PM", "--dry-run", "--force"]).unwrap();
        assert_eq!(args.time, LectureTime::Midday);
        assert!(args.dry_run);
        assert!(args.force);
    }

    #[test]
    fn test_time_is_required_and_enumerated() {
        assert!(Args::try_parse_from(["checkin"]).is_err());
        assert!(Args::try_parse_from(["checkin", "--time", "3PM"]).is_err());
        assert!(Args::try_parse_from(["checkin", "--time", "morning"]).is_err());
    }
}
