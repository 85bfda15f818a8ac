//! The sample ride-analytics dataset rendered by the dashboard.
//!
//! All values are fixed literals — there is no pipeline behind them and no
//! mutation at runtime. The dashboard, the JSON API, and the CLI report are
//! different views over [`sample`].

use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Direction of a metric's month-over-month movement, used to pick the
/// badge color and arrow orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One headline metric card.
#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    /// Pre-formatted display value ("12,847", "$284,673", "18m").
    pub value: &'static str,
    /// Comparison caption ("+12.5% vs last month").
    pub delta: &'static str,
    pub trend: Trend,
}

/// One point of the rides-over-time series.
#[derive(Debug, Clone, Serialize)]
pub struct RidePoint {
    pub date: &'static str,
    pub rides: u32,
    pub surge: u32,
}

/// One entry of the top-locations breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub rides: u32,
    pub percentage: f64,
}

/// One customer segment with its share of rides.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub name: &'static str,
    pub share_pct: u32,
}

/// Performance overview scalars.
#[derive(Debug, Clone, Serialize)]
pub struct Performance {
    pub average_rating: f64,
    pub completion_rate_pct: u32,
    pub avg_wait_minutes: f64,
}

/// Everything the dashboard shows, in one serializable document.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub metrics: Vec<MetricCard>,
    pub rides_over_time: Vec<RidePoint>,
    pub top_locations: Vec<Location>,
    pub customer_segments: Vec<Segment>,
    pub performance: Performance,
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

/// The full sample dataset.
pub fn sample() -> DashboardData {
    DashboardData {
        metrics: vec![
            MetricCard {
                label: "Total Rides",
                value: "12,847",
                delta: "+12.5% vs last month",
                trend: Trend::Up,
            },
            MetricCard {
                label: "Active Drivers",
                value: "1,248",
                delta: "+8.3% vs last month",
                trend: Trend::Up,
            },
            MetricCard {
                label: "Revenue",
                value: "$284,673",
                delta: "+15.2% vs last month",
                trend: Trend::Up,
            },
            MetricCard {
                label: "Avg. Trip Time",
                value: "18m",
                delta: "+2.1% vs last month",
                trend: Trend::Down,
            },
        ],
        rides_over_time: vec![
            RidePoint { date: "Aug 01", rides: 320, surge: 28 },
            RidePoint { date: "Aug 03", rides: 410, surge: 42 },
            RidePoint { date: "Aug 05", rides: 368, surge: 31 },
            RidePoint { date: "Aug 07", rides: 512, surge: 54 },
            RidePoint { date: "Aug 09", rides: 476, surge: 40 },
            RidePoint { date: "Aug 11", rides: 598, surge: 66 },
            RidePoint { date: "Aug 13", rides: 544, surge: 57 },
        ],
        top_locations: vec![
            Location { name: "Downtown", rides: 3247, percentage: 25.3 },
            Location { name: "Airport", rides: 2891, percentage: 22.5 },
            Location { name: "University District", rides: 2156, percentage: 16.8 },
            Location { name: "Business District", rides: 1876, percentage: 14.6 },
            Location { name: "Shopping Mall", rides: 1423, percentage: 11.1 },
        ],
        customer_segments: vec![
            Segment { name: "Business Travelers", share_pct: 31 },
            Segment { name: "Students", share_pct: 22 },
            Segment { name: "Tourists", share_pct: 18 },
            Segment { name: "Daily Commuters", share_pct: 29 },
        ],
        performance: Performance {
            average_rating: 4.8,
            completion_rate_pct: 92,
            avg_wait_minutes: 3.2,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_has_one_point_per_sampled_day() {
        let data = sample();
        assert_eq!(data.rides_over_time.len(), 7);
        assert_eq!(data.rides_over_time[0].date, "Aug 01");
        assert_eq!(data.rides_over_time[6].date, "Aug 13");
    }

    #[test]
    fn surge_never_exceeds_rides() {
        for point in sample().rides_over_time {
            assert!(point.surge < point.rides, "{}: surge >= rides", point.date);
        }
    }

    #[test]
    fn locations_ranked_by_volume() {
        let data = sample();
        for pair in data.top_locations.windows(2) {
            assert!(pair[0].rides >= pair[1].rides);
            assert!(pair[0].percentage >= pair[1].percentage);
        }
    }

    #[test]
    fn segments_cover_the_whole_customer_base() {
        let total: u32 = sample().customer_segments.iter().map(|s| s.share_pct).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["metrics"][0]["label"].is_string());
        assert_eq!(json["metrics"][3]["trend"], "down");
        assert_eq!(json["rides_over_time"][0]["rides"], 320);
        assert_eq!(json["performance"]["completion_rate_pct"], 92);
    }
}
