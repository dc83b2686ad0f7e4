/// Start-form input, difficulty and the validated player.
pub mod start;
/// Field validators for the start form.
pub mod validation;
/// Read-only snapshots of round state for presentation layers.
pub mod view;
