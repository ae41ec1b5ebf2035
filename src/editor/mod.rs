/*!
 * Attribute editing over the document model.
 *
 * Every operation takes an explicit range or point resolved by the
 * caller; the core never reads an ambient "current selection". Each
 * mutation is atomic with respect to its range: the range and value
 * are validated first and either the whole range changes or a typed
 * error is returned with the document untouched.
 *
 * # Architecture
 *
 * - `range`: document positions and ranges
 * - `mutations`: range-scoped attribute and break operations
 * - `session`: the dependency-injected editing session wiring the
 *   document, voice catalog, and compile/validate gate together
 */

pub mod mutations;
pub mod range;
pub mod session;

// Re-export main types
pub use mutations::{
    clear_attributes, insert_break, remove_breaks, set_break_strength, set_pitch,
    set_pronunciation, set_rate, set_voice, set_volume,
};
pub use range::{DocPoint, DocRange};
pub use session::EditorSession;
