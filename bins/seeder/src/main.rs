//! Database seeder for Aurum development and testing.
//!
//! Seeds marketing-site content: team members, testimonials, and the
//! investment options shown on the dashboard. Each table is only seeded
//! when it is empty, so the seeder is safe to re-run.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use aurum_db::entities::{investment_options, team_members, testimonials};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = aurum_db::connect(&database_url, 5)
        .await
        .expect("Failed to connect to database");

    println!("Seeding team members...");
    seed_team_members(&db).await;

    println!("Seeding testimonials...");
    seed_testimonials(&db).await;

    println!("Seeding investment options...");
    seed_investment_options(&db).await;

    println!("Seeding complete!");
}

/// Seeds the marketing-site team roster.
async fn seed_team_members(db: &DatabaseConnection) {
    match team_members::Entity::find().count(db).await {
        Ok(0) => {}
        Ok(n) => {
            println!("  {n} team members already present, skipping...");
            return;
        }
        Err(e) => {
            eprintln!("Failed to count team members: {e}");
            return;
        }
    }

    let members = [
        ("Reda Assel", "Chief Operating Officer", "/images/team/member-1.jpg"),
        ("Laura Whitlock", "Financial Consultant", "/images/team/member-2.jpg"),
        ("Crystal Rocillo", "Chief Financial Officer", "/images/team/member-3.jpg"),
        ("Michael Torres", "Property Manager", "/images/team/member-4.jpg"),
        ("Sarah Johnson", "Marketing Director", "/images/team/member-5.jpg"),
        ("David Chen", "Investment Analyst", "/images/team/member-6.jpg"),
        ("Emma Martinez", "Client Relations Manager", "/images/team/member-7.jpg"),
    ];

    let mut inserted = 0;
    for (sort_order, (name, role, image)) in (0i32..).zip(members) {
        let member = team_members::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            role: Set(role.to_string()),
            image: Set(image.to_string()),
            instagram: Set(Some("https://instagram.com/".to_string())),
            sort_order: Set(sort_order),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = member.insert(db).await {
            eprintln!("Failed to insert team member {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} team members");
}

/// Seeds the landing-page testimonials.
async fn seed_testimonials(db: &DatabaseConnection) {
    match testimonials::Entity::find().count(db).await {
        Ok(0) => {}
        Ok(n) => {
            println!("  {n} testimonials already present, skipping...");
            return;
        }
        Err(e) => {
            eprintln!("Failed to count testimonials: {e}");
            return;
        }
    }

    const QUOTE: &str = "Our members are so impressed. It's intuitive. It's clean. \
                         It's distraction free. If you're building a community.";

    let entries = [
        ("Musharof Chy", "Founder @TailGrids", "/images/testimonials/auth-01.png"),
        ("Devid Weilium", "Founder @UIdeck", "/images/testimonials/auth-02.png"),
        ("Lethium Frenci", "Founder @Lineicons", "/images/testimonials/auth-03.png"),
    ];

    let mut inserted = 0;
    for (name, designation, image) in entries {
        let entry = testimonials::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            designation: Set(designation.to_string()),
            content: Set(QUOTE.to_string()),
            image: Set(image.to_string()),
            star: Set(5),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = entry.insert(db).await {
            eprintln!("Failed to insert testimonial {name}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} testimonials");
}

/// Seeds the investment options offered on the dashboard.
async fn seed_investment_options(db: &DatabaseConnection) {
    match investment_options::Entity::find().count(db).await {
        Ok(0) => {}
        Ok(n) => {
            println!("  {n} investment options already present, skipping...");
            return;
        }
        Err(e) => {
            eprintln!("Failed to count investment options: {e}");
            return;
        }
    }

    struct OptionSeed {
        title: &'static str,
        image: &'static str,
        min_investment: Decimal,
        description: &'static str,
        link: &'static str,
    }

    let options = [
        OptionSeed {
            title: "Entire Rental Property Ownership",
            image: "/images/investment/entire-ownership.jpg",
            min_investment: dec!(15000),
            description: "Step into full ownership of a profitable Airbnb rental property \
                with an investment as low as $15,000. This option grants you 100% control \
                of the asset and all rental income it generates. No revenue sharing, no \
                third-party splits. You decide how it's managed, when it's rented, and how \
                the earnings are reinvested or withdrawn. Perfect for investors seeking \
                maximum autonomy and long-term wealth through short-term rentals.",
            link: "/investment/entire-ownership",
        },
        OptionSeed {
            title: "Mortgage Backed Airbnb Arbitrage",
            image: "/images/investment/mortgage-backed.jpg",
            min_investment: dec!(45000),
            description: "Aurum helps investors acquire high performing Airbnb properties \
                using strategic mortgage financing. With investments starting from just \
                $45,000, you only fund 15% to 30% of the property's cost, while we cover \
                the rest through the profit we make from short-term rentals. We fully \
                furnish, manage, and list the property on Airbnb; using 50% of the monthly \
                profit to repay the mortgage and remitting the other 50% directly to you. \
                Once the loan is cleared, typically within 3 years, you decide whether to \
                cash out, continue earning, or take over full control of the property.",
            link: "/investment/mortgage-backed",
        },
    ];

    let mut inserted = 0;
    for (sort_order, seed) in (0i32..).zip(options) {
        let option = investment_options::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(seed.title.to_string()),
            image: Set(seed.image.to_string()),
            min_investment: Set(seed.min_investment),
            description: Set(seed.description.to_string()),
            link: Set(Some(seed.link.to_string())),
            sort_order: Set(sort_order),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = option.insert(db).await {
            eprintln!("Failed to insert investment option {}: {e}", seed.title);
        } else {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} investment options");
}
