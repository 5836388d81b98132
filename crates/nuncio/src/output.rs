use nuncio_operations::OperationError;
use nuncio_operations::operations::{PreparedRelease, ReleaseOutcome};

pub(crate) fn print_outcome(prepared: &PreparedRelease, outcome: &ReleaseOutcome) {
    let plan = &prepared.plan;
    match outcome {
        ReleaseOutcome::DryRun(steps) => {
            println!("Dry run - no changes will be made.\n");
            println!(
                "{} {} -> {} (tag {})\n",
                plan.package, plan.current_version, plan.next_version, plan.tag
            );
            for step in steps {
                println!("{step}");
            }
        }
        ReleaseOutcome::Released(output) => {
            println!("{}", output.audit);
            println!(
                "\nReleased {} {} (was {}), tag {}{}",
                output.package,
                output.version,
                output.previous_version,
                output.tag,
                if output.published { ", published to npm" } else { "" }
            );
        }
    }
}

/// Step outcomes and leftover manual work after a failed release.
pub(crate) fn print_rollback_report(error: &OperationError) {
    let Some(audit) = error.audit_summary() else {
        return;
    };

    eprintln!("\nsteps:");
    for line in audit.lines() {
        eprintln!("  {line}");
    }

    let manual = error.not_attempted();
    if manual.is_empty() {
        eprintln!("\nEvery completed step was rolled back.");
    } else {
        eprintln!("\nRollback stopped. Undo these by hand:");
        for action in manual {
            eprintln!("  - {action}");
        }
    }
}
