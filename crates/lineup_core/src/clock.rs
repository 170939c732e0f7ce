use chrono::{DateTime, Utc};

/// Time source for ids and history dates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Build `<prefix>_<millis>`, bumping the number until `taken` says it is free.
pub(crate) fn time_derived_id(prefix: &str, millis: i64, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = millis;
    loop {
        let candidate = format!("{}_{}", prefix, stamp);
        if !taken(&candidate) {
            return candidate;
        }
        stamp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_derived_id_skips_taken_ids() {
        let taken = ["f_100".to_string(), "f_101".to_string()];
        let id = time_derived_id("f", 100, |candidate| taken.iter().any(|t| t == candidate));
        assert_eq!(id, "f_102");
    }
}
