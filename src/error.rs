// Copyright (C) 2020-2026 Andy Kurnia.

// Where a failure was detected. Only the edges can fail: the generator itself
// takes validated boards and words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Board,
    Dictionary,
    Request,
    Config,
    Other,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Board => "board",
            Stage::Dictionary => "dictionary",
            Stage::Request => "request",
            Stage::Config => "config",
            Stage::Other => "error",
        }
    }
}

pub struct PressError {
    stage: Stage,
    s: String,
}

impl PressError {
    #[inline(always)]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline(always)]
    pub fn message(&self) -> &str {
        &self.s
    }
}

impl std::fmt::Display for PressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Stage::Other => write!(f, "{}", self.s),
            stage => write!(f, "{}: {}", stage.name(), self.s),
        }
    }
}

impl std::fmt::Debug for PressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for PressError {}

pub fn new(s: String) -> PressError {
    at(Stage::Other, s)
}

pub fn at(stage: Stage, s: String) -> PressError {
    PressError { stage, s }
}

// the stage of a boxed error, if it is one of ours.
pub fn stage_of(err: &BoxAnyError) -> Option<Stage> {
    err.downcast_ref::<PressError>().map(PressError::stage)
}

// Send + Sync so errors can come back from the server's blocking pool.
pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($stage:expr, $error:expr) => {
        return Err($crate::error::at($stage, $error).into());
    };
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}
