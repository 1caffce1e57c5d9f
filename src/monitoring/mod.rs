/*!
 * Monitoring Module
 * Tracing setup for the simulator
 */

pub mod tracer;

pub use tracer::init_tracing;
