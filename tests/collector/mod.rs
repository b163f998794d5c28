/*!
Collector check tests.

Covers the region gate, the response classifier and the end-to-end connect
task with stub transports.
*/

pub mod gate_tests;
