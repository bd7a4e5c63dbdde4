// src/services/bookings_service.rs
//
// Admin bookings console: filter, sort, select and summarize an in-memory list.
// Status changes made here stay local.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    str::FromStr,
    sync::Arc,
};

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::{AppError, AppResult},
    models::booking::{BookingRecord, BookingStatus},
    services::notifier::{Notice, Notifier},
};

// =========================================================================
//  FILTERS
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeFilter {
    Today,
    // Weeks start on Sunday.
    ThisWeek,
    ThisMonth,
    AllTime,
    // Inclusive calendar days. Applies only when both bounds are set.
    Custom { start: Option<NaiveDate>, end: Option<NaiveDate> },
}

impl FromStr for DateRangeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateRangeFilter::Today),
            "this-week" => Ok(DateRangeFilter::ThisWeek),
            "this-month" => Ok(DateRangeFilter::ThisMonth),
            "all-time" => Ok(DateRangeFilter::AllTime),
            "custom" => Ok(DateRangeFilter::Custom { start: None, end: None }),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingsFilter {
    pub date_range: DateRangeFilter,
    // None = all statuses
    pub status: Option<BookingStatus>,
    // None = all categories. Compared case-insensitively.
    pub service_category: Option<String>,
    pub search: String,
    pub show_no_shows: bool,
}

impl Default for BookingsFilter {
    fn default() -> Self {
        Self {
            date_range: DateRangeFilter::ThisWeek,
            status: None,
            service_category: None,
            search: String::new(),
            show_no_shows: true,
        }
    }
}

struct CalendarMarks {
    today: NaiveDate,
    week_start: NaiveDate,
    month_start: NaiveDate,
}

impl CalendarMarks {
    fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
        let month_start = today.with_day(1).unwrap_or(today);
        Self { today, week_start, month_start }
    }
}

fn local_date<Tz: TimeZone>(booking: &BookingRecord, now: &DateTime<Tz>) -> NaiveDate {
    booking.date_time.with_timezone(&now.timezone()).date_naive()
}

/// True when `booking` passes every criterion of `filter`. Calendar days are
/// taken in the time zone of `now`.
pub fn matches<Tz: TimeZone>(booking: &BookingRecord, filter: &BookingsFilter, now: &DateTime<Tz>) -> bool {
    if filter.status.is_some_and(|status| booking.status != status) {
        return false;
    }
    if let Some(category) = &filter.service_category {
        if booking.service.category.to_lowercase() != category.to_lowercase() {
            return false;
        }
    }
    if !filter.show_no_shows && booking.status == BookingStatus::NoShow {
        return false;
    }

    let search = filter.search.to_lowercase();
    if !search.is_empty() {
        let name = booking.client.full_name().to_lowercase();
        let email = booking.client.email.to_lowercase();
        if !name.contains(&search) && !email.contains(&search) {
            return false;
        }
    }

    let marks = CalendarMarks::at(now);
    let date = local_date(booking, now);
    match filter.date_range {
        DateRangeFilter::Today => date == marks.today,
        DateRangeFilter::ThisWeek => date >= marks.week_start,
        DateRangeFilter::ThisMonth => date >= marks.month_start,
        DateRangeFilter::AllTime => true,
        DateRangeFilter::Custom { start, end } => match (start, end) {
            (Some(start), Some(end)) => date >= start && date <= end,
            _ => true,
        },
    }
}

// =========================================================================
//  SORT
// =========================================================================

// Upcoming (strictly after `now`) first, earliest first; then past, latest first.
fn compare(a: &BookingRecord, b: &BookingRecord, now: DateTime<Utc>) -> Ordering {
    let a_future = a.date_time > now;
    let b_future = b.date_time > now;
    match (a_future, b_future) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.date_time.cmp(&b.date_time),
        (false, false) => b.date_time.cmp(&a.date_time),
    }
}

pub fn sort_bookings(bookings: &mut [BookingRecord], now: DateTime<Utc>) {
    bookings.sort_by(|a, b| compare(a, b, now));
}

pub fn filter_and_sort<'a, Tz: TimeZone>(
    bookings: &'a [BookingRecord],
    filter: &BookingsFilter,
    now: &DateTime<Tz>,
) -> Vec<&'a BookingRecord> {
    let now_utc = now.with_timezone(&Utc);
    let mut visible: Vec<&BookingRecord> = bookings.iter().filter(|b| matches(b, filter, now)).collect();
    visible.sort_by(|a, b| compare(a, b, now_utc));
    visible
}

// =========================================================================
//  SUMMARY
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BookingsSummary {
    pub total: usize,
    pub today: usize,
    pub this_week: usize,
    pub this_month: usize,
    // Future and not cancelled.
    pub upcoming: usize,
    pub next_appointment: Option<BookingRecord>,
    pub status_counts: HashMap<BookingStatus, usize>,
    // Completed bookings only.
    pub earnings: Decimal,
}

impl BookingsSummary {
    pub fn count(&self, status: BookingStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

pub fn summarize<Tz: TimeZone>(bookings: &[BookingRecord], now: &DateTime<Tz>) -> BookingsSummary {
    let marks = CalendarMarks::at(now);
    let now_utc = now.with_timezone(&Utc);

    let mut summary = BookingsSummary {
        total: bookings.len(),
        today: 0,
        this_week: 0,
        this_month: 0,
        upcoming: 0,
        next_appointment: None,
        status_counts: HashMap::new(),
        earnings: Decimal::ZERO,
    };

    for booking in bookings {
        let date = local_date(booking, now);
        summary.today += usize::from(date == marks.today);
        summary.this_week += usize::from(date >= marks.week_start);
        summary.this_month += usize::from(date >= marks.month_start);
        *summary.status_counts.entry(booking.status).or_default() += 1;

        if booking.status == BookingStatus::Completed {
            summary.earnings += booking.service.price;
        }
        if booking.date_time > now_utc && booking.status != BookingStatus::Cancelled {
            summary.upcoming += 1;
            let earlier = summary
                .next_appointment
                .as_ref()
                .is_none_or(|next| booking.date_time < next.date_time);
            if earlier {
                summary.next_appointment = Some(booking.clone());
            }
        }
    }
    summary
}

// =========================================================================
//  PAYMENT RECORDS
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEarnings {
    pub year: i32,
    pub month: u32,
    // "October 2026"
    pub label: String,
    pub bookings: usize,
    pub earnings: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
    pub category_counts: BTreeMap<String, usize>,
}

impl MonthlyEarnings {
    /// Category with the most completed bookings. Ties go to the name that sorts first.
    pub fn top_category(&self) -> Option<&str> {
        self.category_counts
            .iter()
            .max_by(|(a_name, a_count), (b_name, b_count)| a_count.cmp(b_count).then_with(|| b_name.cmp(a_name)))
            .map(|(name, _)| name.as_str())
    }
}

/// Completed bookings grouped by calendar month in `tz`, most recent month first.
pub fn payment_records<Tz: TimeZone>(bookings: &[BookingRecord], tz: &Tz) -> Vec<MonthlyEarnings> {
    let mut months: BTreeMap<(i32, u32), MonthlyEarnings> = BTreeMap::new();

    for booking in bookings.iter().filter(|b| b.status == BookingStatus::Completed) {
        let local = booking.date_time.with_timezone(tz);
        let key = (local.year(), local.month());
        let entry = months.entry(key).or_insert_with(|| MonthlyEarnings {
            year: key.0,
            month: key.1,
            label: local.date_naive().format("%B %Y").to_string(),
            bookings: 0,
            earnings: Decimal::ZERO,
            by_category: BTreeMap::new(),
            category_counts: BTreeMap::new(),
        });

        let category = &booking.service.category;
        entry.bookings += 1;
        entry.earnings += booking.service.price;
        *entry.by_category.entry(category.clone()).or_default() += booking.service.price;
        *entry.category_counts.entry(category.clone()).or_default() += 1;
    }

    months.into_values().rev().collect()
}

/// Mean earnings per month that had any completed booking.
pub fn average_monthly_earnings(records: &[MonthlyEarnings]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = records.iter().map(|m| m.earnings).sum();
    (total / Decimal::from(records.len())).round_dp(2)
}

// =========================================================================
//  CONSOLE
// =========================================================================

pub struct BookingsConsole {
    bookings: Vec<BookingRecord>,
    filter: BookingsFilter,
    selected: Vec<String>,
    notifier: Arc<dyn Notifier>,
}

impl BookingsConsole {
    pub fn new(bookings: Vec<BookingRecord>, notifier: Arc<dyn Notifier>) -> Self {
        Self { bookings, filter: BookingsFilter::default(), selected: Vec::new(), notifier }
    }

    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    pub fn filter(&self) -> &BookingsFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: BookingsFilter) {
        self.filter = filter;
    }

    pub fn visible<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&BookingRecord> {
        filter_and_sort(&self.bookings, &self.filter, now)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Returns whether the booking is selected afterwards.
    pub fn toggle_selected(&mut self, id: &str) -> AppResult<bool> {
        self.index_of(id)?;
        match self.selected.iter().position(|s| s == id) {
            Some(index) => {
                self.selected.remove(index);
                Ok(false)
            }
            None => {
                self.selected.push(id.to_string());
                Ok(true)
            }
        }
    }

    /// Replaces the selection with every booking currently visible.
    pub fn select_all_visible<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        let ids: Vec<String> = self.visible(now).into_iter().map(|b| b.id.clone()).collect();
        self.selected = ids;
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Marks every selected booking completed and clears the selection.
    /// Returns how many bookings were touched.
    pub fn mark_as_completed(&mut self) -> usize {
        if self.selected.is_empty() {
            return 0;
        }
        let mut changed = 0;
        for booking in self.bookings.iter_mut().filter(|b| self.selected.contains(&b.id)) {
            booking.status = BookingStatus::Completed;
            changed += 1;
        }
        self.selected.clear();
        tracing::info!(changed, "Bookings marked as completed");
        self.notifier.notify(
            Notice::success("Bookings updated")
                .with_description("The selected bookings have been marked as completed."),
        );
        changed
    }

    pub fn set_status(&mut self, id: &str, status: BookingStatus) -> AppResult<()> {
        let index = self.index_of(id)?;
        self.bookings[index].status = status;
        Ok(())
    }

    pub fn summary<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> BookingsSummary {
        summarize(&self.bookings, now)
    }

    pub fn payment_records<Tz: TimeZone>(&self, tz: &Tz) -> Vec<MonthlyEarnings> {
        payment_records(&self.bookings, tz)
    }

    fn index_of(&self, id: &str) -> AppResult<usize> {
        self.bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Booking {id}")))
    }
}
