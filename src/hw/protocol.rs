//! The byte-level host/device command and response protocol.
//!
//! All multi-byte integers are big-endian. This module only implements the wire format (§6 of the
//! design); the physical transport (UART/JTAG) is out of scope and owned by whatever carries these
//! bytes between host and device.
use crate::error::SolverError;

/// Maximum literals per clause accepted by the wire format (`K_MAX`).
pub const K_MAX: usize = 5;

/// A variable's value as represented in hardware assignment memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignVal {
    Unassigned = 0,
    False = 1,
    True = 2,
}

impl AssignVal {
    pub fn from_byte(byte: u8) -> Result<AssignVal, SolverError> {
        match byte {
            0 => Ok(AssignVal::Unassigned),
            1 => Ok(AssignVal::False),
            2 => Ok(AssignVal::True),
            other => Err(SolverError::ProtocolFraming(other)),
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// A host-to-device command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install a clause at `cid`.
    WriteClause {
        cid: u16,
        size: u8,
        sat: bool,
        lits: [u16; K_MAX],
    },
    /// Set one watch-list entry.
    WriteWlEntry { lit: u16, idx: u8, cid: u16 },
    /// Set a watch-list's length.
    WriteWlLen { lit: u16, len: u8 },
    /// Write a variable's assignment.
    WriteAssign { var: u16, val: AssignVal },
    /// Begin one propagation round, watching `false_lit`.
    BcpStart { false_lit: u16 },
    /// Clear the FSM and latches.
    ResetState,
}

impl Command {
    /// Appends this command's wire encoding to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        match *self {
            Command::WriteClause {
                cid,
                size,
                sat,
                lits,
            } => {
                out.push(0x01);
                out.extend_from_slice(&cid.to_be_bytes());
                out.push(size);
                out.push(sat as u8);
                for lit in &lits {
                    out.extend_from_slice(&lit.to_be_bytes());
                }
            }
            Command::WriteWlEntry { lit, idx, cid } => {
                out.push(0x02);
                out.extend_from_slice(&lit.to_be_bytes());
                out.push(idx);
                out.extend_from_slice(&cid.to_be_bytes());
            }
            Command::WriteWlLen { lit, len } => {
                out.push(0x03);
                out.extend_from_slice(&lit.to_be_bytes());
                out.push(len);
            }
            Command::WriteAssign { var, val } => {
                out.push(0x04);
                out.extend_from_slice(&var.to_be_bytes());
                out.push(val.to_byte());
            }
            Command::BcpStart { false_lit } => {
                out.push(0x05);
                out.extend_from_slice(&false_lit.to_be_bytes());
            }
            Command::ResetState => out.push(0x06),
        }
    }

    /// Decodes one command from the front of `buf`, returning the command and the number of
    /// bytes consumed, or `None` if `buf` doesn't yet hold a complete command.
    pub fn decode(buf: &[u8]) -> Result<Option<(Command, usize)>, SolverError> {
        let tag = match buf.first() {
            Some(&b) => b,
            None => return Ok(None),
        };

        let needed = match tag {
            0x01 => 1 + 2 + 1 + 1 + K_MAX * 2,
            0x02 => 1 + 2 + 1 + 2,
            0x03 => 1 + 2 + 1,
            0x04 => 1 + 2 + 1,
            0x05 => 1 + 2,
            0x06 => 1,
            other => return Err(SolverError::ProtocolFraming(other)),
        };

        if buf.len() < needed {
            return Ok(None);
        }

        let u16_at = |off: usize| u16::from_be_bytes([buf[off], buf[off + 1]]);

        let command = match tag {
            0x01 => {
                let cid = u16_at(1);
                let size = buf[3];
                let sat = buf[4] != 0;
                let mut lits = [0u16; K_MAX];
                for (i, lit) in lits.iter_mut().enumerate() {
                    *lit = u16_at(5 + i * 2);
                }
                Command::WriteClause {
                    cid,
                    size,
                    sat,
                    lits,
                }
            }
            0x02 => Command::WriteWlEntry {
                lit: u16_at(1),
                idx: buf[3],
                cid: u16_at(4),
            },
            0x03 => Command::WriteWlLen {
                lit: u16_at(1),
                len: buf[3],
            },
            0x04 => Command::WriteAssign {
                var: u16_at(1),
                val: AssignVal::from_byte(buf[3])?,
            },
            0x05 => Command::BcpStart {
                false_lit: u16_at(1),
            },
            0x06 => Command::ResetState,
            other => return Err(SolverError::ProtocolFraming(other)),
        };

        Ok(Some((command, needed)))
    }
}

/// A device-to-host response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// One forced implication.
    Implication { var: u16, val: AssignVal, reason: u16 },
    /// Round finished with no conflict.
    DoneOk { cid: u16 },
    /// Round finished with a conflict in clause `cid`.
    DoneConflict { cid: u16 },
}

impl Response {
    pub fn encode(&self, out: &mut Vec<u8>) {
        match *self {
            Response::Implication { var, val, reason } => {
                out.push(0xB0);
                out.extend_from_slice(&var.to_be_bytes());
                out.push(val.to_byte());
                out.extend_from_slice(&reason.to_be_bytes());
            }
            Response::DoneOk { cid } => {
                out.push(0xC0);
                out.extend_from_slice(&cid.to_be_bytes());
                out.push(0x00);
            }
            Response::DoneConflict { cid } => {
                out.push(0xC1);
                out.extend_from_slice(&cid.to_be_bytes());
                out.push(0x00);
            }
        }
    }
}

/// Decodes a device response stream one packet at a time.
///
/// On the response-type byte it dispatches to a 5-byte (implication) or 3-byte (done/conflict)
/// continuation, matching the host-side decoder described in the component design. Bytes are fed
/// incrementally; [`ResponseDecoder::poll`] returns `Ok(None)` until a full packet is buffered.
#[derive(Default)]
pub struct ResponseDecoder {
    buf: Vec<u8>,
}

impl ResponseDecoder {
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pops the next fully-buffered response, if any.
    pub fn poll(&mut self) -> Result<Option<Response>, SolverError> {
        let tag = match self.buf.first() {
            Some(&b) => b,
            None => return Ok(None),
        };

        let needed = match tag {
            0xB0 => 5,
            0xC0 | 0xC1 => 3,
            other => return Err(SolverError::ProtocolFraming(other)),
        };

        if self.buf.len() < 1 + needed {
            return Ok(None);
        }

        let u16_at = |off: usize| u16::from_be_bytes([self.buf[off], self.buf[off + 1]]);

        let response = match tag {
            0xB0 => Response::Implication {
                var: u16_at(1),
                val: AssignVal::from_byte(self.buf[3])?,
                reason: u16_at(4),
            },
            0xC0 => Response::DoneOk { cid: u16_at(1) },
            0xC1 => Response::DoneConflict { cid: u16_at(1) },
            other => return Err(SolverError::ProtocolFraming(other)),
        };

        self.buf.drain(..1 + needed);
        Ok(Some(response))
    }
}
