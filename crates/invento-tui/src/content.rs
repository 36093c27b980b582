//! Feature cards shown on the showcase page

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub accent: Color,
}

pub const HEADLINE: &str = "Everything You Need to Run Your Business";
pub const CAROUSEL_HINT: &str = "Auto-scrolling \u{2022} Hover & scroll to explore";

pub const FEATURES: [FeatureCard; 10] = [
    FeatureCard {
        title: "Lightning-Fast POS",
        description: "Process transactions in under 3 seconds with barcode scanning, quick search, and one-tap checkout.",
        accent: Color::Rgb(0xF5, 0x9E, 0x0B),
    },
    FeatureCard {
        title: "Smart Inventory",
        description: "Real-time stock tracking, low-stock alerts, automatic reordering, and multi-location inventory sync.",
        accent: Color::Rgb(0x8B, 0x5C, 0xF6),
    },
    FeatureCard {
        title: "Advanced Analytics",
        description: "Visual dashboards, sales trends, profit margins, and AI-powered insights to grow your business.",
        accent: Color::Rgb(0x06, 0xB6, 0xD4),
    },
    FeatureCard {
        title: "Multi-Store Management",
        description: "Manage unlimited locations from one dashboard. Transfer inventory and view consolidated reports.",
        accent: Color::Rgb(0x10, 0xB9, 0x81),
    },
    FeatureCard {
        title: "Team Management",
        description: "Role-based permissions, shift tracking, performance analytics, and secure staff access controls.",
        accent: Color::Rgb(0xEF, 0x44, 0x44),
    },
    FeatureCard {
        title: "Payment Processing",
        description: "Accept all payment types: cards, mobile wallets, contactless, and split payments seamlessly.",
        accent: Color::Rgb(0x25, 0x63, 0xEB),
    },
    FeatureCard {
        title: "Customer Management",
        description: "Build customer profiles, loyalty programs, purchase history, and personalized marketing campaigns.",
        accent: Color::Rgb(0xEC, 0x48, 0x99),
    },
    FeatureCard {
        title: "Reports & Exports",
        description: "Generate detailed reports, export to CSV/PDF, schedule automated reports, and share with stakeholders.",
        accent: Color::Rgb(0xF9, 0x73, 0x16),
    },
    FeatureCard {
        title: "Mobile App",
        description: "iOS and Android apps for on-the-go management. Sell anywhere with offline mode and cloud sync.",
        accent: Color::Rgb(0x14, 0xB8, 0xA6),
    },
    FeatureCard {
        title: "Enterprise Security",
        description: "Bank-level encryption, PCI compliance, daily backups, 2FA, and audit logs for complete peace of mind.",
        accent: Color::Rgb(0x63, 0x66, 0xF1),
    },
];

/// Two-digit card number, starting at `01`
pub fn card_number(index: usize) -> String {
    format!("{:02}", index + 1)
}
