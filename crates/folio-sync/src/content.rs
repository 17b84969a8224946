//! The authored portfolio content. Edit here, then run `sync-portfolio` to
//! regenerate the JSON artifact.

use crate::source::{SourceModule, SourceValue as V};

fn skill(name: &str, level: i32, icon: V) -> V {
    V::object([
        ("name", V::from(name)),
        ("level", V::from(level)),
        ("icon", icon),
    ])
}

fn personal_info() -> V {
    V::object([
        ("name", V::from("Alex Moreno")),
        ("title", V::from("Full-Stack Developer")),
        ("location", V::from("Lisbon, Portugal")),
        ("email", V::from("hello@alexmoreno.dev")),
        ("available", V::from(true)),
    ])
}

fn skills() -> V {
    V::array([
        skill("TypeScript", 92, V::icon("FileCode")),
        skill("React", 90, V::icon("Atom")),
        skill("Rust", 78, V::icon("Cog")),
        skill("Node.js", 85, V::icon("Server")),
        skill("PostgreSQL", 80, V::icon_object("Database")),
        skill("Three.js", 70, V::icon("Box")),
    ])
}

fn skill_categories() -> V {
    V::array([
        V::object([
            ("title", V::from("Frontend")),
            ("icon", V::icon("Layout")),
            ("skills", V::strings(["React", "Astro", "Tailwind CSS", "Three.js"])),
        ]),
        V::object([
            ("title", V::from("Backend")),
            ("icon", V::icon_object("Server")),
            ("skills", V::strings(["Node.js", "Rust", "PostgreSQL", "Redis"])),
        ]),
        V::object([
            ("title", V::from("Tooling")),
            ("icon", V::icon("Wrench")),
            ("skills", V::strings(["Docker", "GitHub Actions", "Vite"])),
        ]),
    ])
}

fn experiences() -> V {
    V::array([
        V::object([
            ("role", V::from("Senior Frontend Engineer")),
            ("company", V::from("Northwind Labs")),
            ("period", V::from("2022 - Present")),
            (
                "highlights",
                V::strings([
                    "Led the migration of the customer dashboard to React Server Components",
                    "Cut median page load time by 38%",
                ]),
            ),
            ("current", V::from(true)),
            ("icon", V::icon("Briefcase")),
        ]),
        V::object([
            ("role", V::from("Full-Stack Developer")),
            ("company", V::from("Bluefin Studio")),
            ("period", V::from("2019 - 2022")),
            (
                "highlights",
                V::strings([
                    "Built a booking platform serving 40k monthly users",
                    "Introduced end-to-end testing across three products",
                ]),
            ),
            ("current", V::from(false)),
            ("icon", V::icon("Briefcase")),
        ]),
    ])
}

fn projects() -> V {
    V::array([
        V::object([
            ("title", V::from("Folio")),
            (
                "description",
                V::from("Personal site with an adaptive WebGPU particle background."),
            ),
            ("tags", V::strings(["Rust", "WebGPU", "Astro"])),
            ("link", V::from("https://github.com/alexmoreno/folio")),
            ("featured", V::from(true)),
            ("icon", V::icon("Sparkles")),
        ]),
        V::object([
            ("title", V::from("Tidewatch")),
            (
                "description",
                V::from("Tide and swell forecasts for surfers, updated every hour."),
            ),
            ("tags", V::strings(["TypeScript", "Node.js", "PostgreSQL"])),
            ("link", V::from("https://tidewatch.app")),
            ("featured", V::from(false)),
            // Anonymous component: exported without a name.
            ("icon", V::icon("")),
        ]),
    ])
}

fn about_skills() -> V {
    V::array([
        V::object([
            ("label", V::from("Years of experience")),
            ("value", V::from(7)),
        ]),
        V::object([
            ("label", V::from("Projects shipped")),
            ("value", V::from(24)),
        ]),
        V::object([
            ("label", V::from("Lighthouse score")),
            ("value", V::from(99.5)),
        ]),
    ])
}

fn services() -> V {
    V::array([
        V::object([
            ("title", V::from("Web applications")),
            (
                "description",
                V::from("Fast, accessible front ends backed by well-tested APIs."),
            ),
            (
                "icon",
                V::Component {
                    name: "Globe".into(),
                    display_name: Some("Globe".into()),
                },
            ),
        ]),
        V::object([
            ("title", V::from("Performance audits")),
            (
                "description",
                V::from("Profiling and fixing slow pages, builds and queries."),
            ),
            ("icon", V::icon("Gauge")),
        ]),
    ])
}

fn nav_links() -> V {
    V::array(["About", "Projects", "Experience", "Contact"].map(|label| {
        V::object([
            ("label", V::from(label)),
            ("href", V::from(format!("#{}", label.to_lowercase()))),
        ])
    }))
}

/// Every export of the content module, in authoring order. Only some of them
/// end up in the artifact.
pub fn portfolio() -> SourceModule {
    SourceModule::new()
        .export("personalInfo", personal_info())
        .export("navLinks", nav_links())
        .export("skills", skills())
        .export("skillCategories", skill_categories())
        .export("experiences", experiences())
        .export("projects", projects())
        .export("aboutSkills", about_skills())
        .export("services", services())
}
