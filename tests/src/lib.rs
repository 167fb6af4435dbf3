//! Cross-crate integration tests: the wake path exercised end to end
//! over the loopback interface, datagram capture included.

#[cfg(test)]
mod wake;
