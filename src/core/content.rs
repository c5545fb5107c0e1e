//! Static sample content shown on the pages. Nothing here changes at runtime.

pub const APP_DESCRIPTION: &str = "A small example app for learning stores, routing and lifecycles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[FeatureCard] = &[
    FeatureCard {
        icon: "🎯",
        title: "Clean Architecture",
        description: "Learn proper folder structure and separation of concerns",
    },
    FeatureCard {
        icon: "🔧",
        title: "Services & DI",
        description: "Understand dependency injection and service patterns",
    },
    FeatureCard {
        icon: "🎨",
        title: "Theming",
        description: "Implement light/dark mode with style variables",
    },
    FeatureCard {
        icon: "🚀",
        title: "Routing",
        description: "Navigation between different views and components",
    },
    FeatureCard {
        icon: "📱",
        title: "Responsive Design",
        description: "Layouts that adapt to the space they are given",
    },
    FeatureCard {
        icon: "♿",
        title: "Accessibility",
        description: "Keyboard navigation and readable contrast",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    /// Percent change since the previous period.
    pub change: f32,
    pub icon: &'static str,
}

pub const STATS: &[StatCard] = &[
    StatCard {
        title: "Total Users",
        value: "12,543",
        change: 12.5,
        icon: "👥",
    },
    StatCard {
        title: "Revenue",
        value: "$45,678",
        change: -3.2,
        icon: "💰",
    },
    StatCard {
        title: "Orders",
        value: "8,901",
        change: 8.7,
        icon: "📦",
    },
    StatCard {
        title: "Growth Rate",
        value: "23.4%",
        change: 15.3,
        icon: "📈",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: u32,
}

pub const DEVICE_BREAKDOWN: &[ChartSlice] = &[
    ChartSlice {
        label: "Desktop",
        value: 45,
    },
    ChartSlice {
        label: "Mobile",
        value: 30,
    },
    ChartSlice {
        label: "Tablet",
        value: 25,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserProfile {
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub projects_completed: u32,
    pub tasks_completed: u32,
    pub experience_points: u32,
    pub notifications: bool,
    pub language: &'static str,
    pub timezone: &'static str,
}

pub const SAMPLE_USER: UserProfile = UserProfile {
    name: "John Developer",
    email: "john@example.com",
    role: "Frontend Developer",
    projects_completed: 42,
    tasks_completed: 156,
    experience_points: 2340,
    notifications: true,
    language: "English",
    timezone: "UTC-5",
};

pub fn change_icon(change: f32) -> &'static str {
    if change >= 0.0 { "↗️" } else { "↘️" }
}

pub fn chart_total(slices: &[ChartSlice]) -> u32 {
    slices.iter().map(|slice| slice.value).sum()
}

/// Share of `value` in the total, rounded to a whole percent.
pub fn percentage(value: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (value as f64 / total as f64 * 100.0).round() as u32
}

pub fn time_of_day(hour: u32) -> &'static str {
    if hour < 12 {
        "morning"
    } else if hour < 17 {
        "afternoon"
    } else {
        "evening"
    }
}

pub fn welcome_message(hour: u32) -> String {
    format!("Good {}! Welcome to Beacon.", time_of_day(hour))
}
