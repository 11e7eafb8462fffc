use std::path::Path;
use wastewatch_core::error::ReportError;
use wastewatch_core::policy::{self, builtin, schema::Policy};

use crate::settings::Settings;

pub fn list() -> Result<(), ReportError> {
    println!("Available predefined policies:\n");
    for name in builtin::PRESETS {
        let policy = builtin::load_preset(name)?;
        println!("  {:<10} {} (v{})", name, policy.name, policy.version);
        if let Some(ref desc) = policy.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(settings: &Settings, preset: Option<&str>) -> Result<(), ReportError> {
    let policy = match preset {
        Some(name) => builtin::load_preset(name)?,
        None => settings.policy()?,
    };
    print_explanation(&policy);
    Ok(())
}

fn print_explanation(policy: &Policy) {
    let v = &policy.validation;
    let r = &policy.routing;

    println!("{} (version {})\n", policy.name, policy.version);
    if let Some(ref desc) = policy.description {
        println!("{}\n", desc);
    }

    println!("Validation:");
    println!(
        "  A report is valid when its location has at least {} words",
        v.min_location_words
    );
    println!(
        "  and its description is longer than {} characters.",
        v.min_description_chars
    );
    if v.image_sufficient {
        println!("  A stored photo alone also makes a report valid.");
    } else {
        println!("  A photo alone does not make a report valid.");
    }
    println!();

    println!("Routing (valid reports only):");
    println!("  Hazardous                -> Critical (Immediate Action), Awaiting Specialized Team Dispatch");
    println!(
        "  Urban Cleanup Sector A   -> High, Assigned to Local Crew ({} hr target)",
        r.local_crew_target_hours
    );
    println!(
        "  Anything else            -> Medium, Queued for Standard Pickup ({} hr target)",
        r.standard_pickup_target_hours
    );
    if r.visual_upgrade {
        println!(
            "  Medium with a photo      -> Medium/High (Visual Verified), Assigned to Local Crew ({} hr target)",
            r.visual_verified_target_hours
        );
    }
    println!();
    println!("Invalid reports are stored as New with no priority.\n");
}

pub fn validate(file: &Path) -> Result<(), ReportError> {
    let policy = policy::load_policy(file)?;

    println!("Policy '{}' (v{}) is valid.", policy.name, policy.version);

    let mut warnings = Vec::new();
    if policy.validation.min_description_chars == 0 {
        warnings.push("any non-empty description counts as detailed".to_string());
    }
    if policy.routing.visual_verified_target_hours > policy.routing.standard_pickup_target_hours {
        warnings.push(format!(
            "visual verified target ({} h) is slower than standard pickup ({} h)",
            policy.routing.visual_verified_target_hours,
            policy.routing.standard_pickup_target_hours
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
