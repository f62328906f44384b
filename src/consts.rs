/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for March
pub const MARCH: u8 = 3;
/// Month number for September
pub const SEPTEMBER: u8 = 9;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;
/// Observed day for a Feb 29 birthday in a non-leap year under the Feb 28 policy
pub const FEBRUARY_DAYS_COMMON: u8 = 28;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
/// Month-first format separator (legacy US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';

/// Length of the "month" used by the rounded time-until headline
pub const APPROX_DAYS_PER_MONTH: u32 = 30;

/// Gregorian year whose lunar cycle index is 0 (Rat)
pub const LUNAR_BASE_YEAR: i32 = 1900;
/// Number of animals in the lunar cycle
pub const LUNAR_CYCLE_LEN: i32 = 12;

/// School-year cutoff month (September 1)
pub const SCHOOL_CUTOFF_MONTH: u8 = SEPTEMBER;
/// School-year cutoff day
pub const SCHOOL_CUTOFF_DAY: u8 = 1;
/// Age at which kindergarten starts
pub const KINDERGARTEN_AGE: i32 = 5;
/// Oldest age that still gets a grade estimate
pub const MAX_SCHOOL_AGE: i32 = 18;
/// Highest grade
pub const MAX_GRADE: u8 = 12;

/// Settings key the contact book is persisted under
pub const CONTACT_LISTS_KEY: &str = "SavedContactLists";
/// Title of the list a fresh contact book starts with
pub const DEFAULT_LIST_TITLE: &str = "Family";
