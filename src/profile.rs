use crate::countdown::{self, Countdown, TimeUntil};
use crate::{CivilDate, EngineConfig, Grade, LunarNewYearTable, LunarSign, ZodiacSign, estimate_grade, lunar_sign};

/// Everything the app shows about one birthday, computed for one reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayProfile {
    pub birth:         CivilDate,
    pub age:           i32,
    pub age_naive:     i32,
    pub next_birthday: Option<CivilDate>,
    pub days_until:    u32,
    pub countdown:     Countdown,
    pub time_until:    TimeUntil,
    pub is_today:      bool,
    pub zodiac:        ZodiacSign,
    pub lunar:         LunarSign,
    pub grade:         Option<Grade>,
}

impl BirthdayProfile {
    pub fn compute(birth: &CivilDate, now: &CivilDate, table: &LunarNewYearTable, config: &EngineConfig) -> Self {
        let policy = config.leap_day_policy();
        let age = countdown::age_with(birth, now, config);
        let countdown = countdown::months_and_days_until_birthday_with(birth, now, policy);
        Self {
            birth: *birth,
            age,
            age_naive: countdown::age_naive(birth, now),
            next_birthday: countdown::next_birthday_date_with(birth, now, policy),
            days_until: countdown::days_until_next_birthday_with(birth, now, policy),
            countdown,
            time_until: countdown.into(),
            is_today: countdown::is_birthday_today_with(birth, now, policy),
            zodiac: ZodiacSign::from_month_day(birth.month_day()),
            lunar: lunar_sign(birth, table),
            grade: estimate_grade(age, birth.month_day()),
        }
    }
}
