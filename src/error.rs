use core::fmt;

/// Setting named by an [`Mcp342xError::InvalidParameter`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Resolution,
    Channel,
    Gain,
    Address,
    MaxAttempts,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Resolution => "resolution",
            Field::Channel => "channel",
            Field::Gain => "gain",
            Field::Address => "address",
            Field::MaxAttempts => "max_attempts",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq)]
pub enum Mcp342xError<BusError> {
    /// Transfer error reported by the bus, passed through untouched
    Bus(BusError),
    /// A setting outside its legal set was rejected before any state change
    InvalidParameter { field: Field, value: u32 },
    /// Exclusive bus access was not obtained within the retry budget
    BusLockTimeout { attempts: u32, waited_us: u64 },
}

impl<BusError> Mcp342xError<BusError> {
    pub(crate) fn invalid(field: Field, value: impl Into<u32>) -> Self {
        Mcp342xError::InvalidParameter {
            field,
            value: value.into(),
        }
    }
}

impl<BusError: fmt::Debug> fmt::Display for Mcp342xError<BusError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mcp342xError::Bus(e) => write!(f, "bus error: {:?}", e),
            Mcp342xError::InvalidParameter { field, value } => {
                write!(f, "{} is not a valid {}", value, field)
            }
            Mcp342xError::BusLockTimeout {
                attempts,
                waited_us,
            } => write!(
                f,
                "bus still locked after {} attempts ({} us waited)",
                attempts, waited_us
            ),
        }
    }
}

#[cfg(feature = "std")]
impl<BusError: fmt::Debug> std::error::Error for Mcp342xError<BusError> {}
