use std::marker::PhantomData;

/// Trait representing a request processor shared read-only across all
/// workers in the pool.
///
/// The `Send + Sync` bound is deliberate: the same handler instance is
/// invoked concurrently from every worker thread, so thread safety is the
/// implementor's responsibility. `Output: Default` supplies the sentinel
/// value substituted when `handle` fails.
pub trait RequestHandler: Send + Sync + 'static {
    type Args: Clone + Send + 'static;
    type Output: Default + Send + 'static;

    fn handle(&self, args: Self::Args) -> anyhow::Result<Self::Output>;
}

/// Adapter turning a plain closure into a [`RequestHandler`].
///
/// Use a tuple as the argument type for handlers that take more than one
/// positional argument.
pub struct FnRequestHandler<F, Args, Output>
where
    F: Fn(Args) -> Output + Send + Sync + 'static,
{
    op: F,
    _marker: PhantomData<fn(Args) -> Output>,
}

impl<F, Args, Output> FnRequestHandler<F, Args, Output>
where
    F: Fn(Args) -> Output + Send + Sync + 'static,
{
    pub fn new(op: F) -> Self {
        Self {
            op,
            _marker: PhantomData,
        }
    }
}

impl<F, Args, Output> From<F> for FnRequestHandler<F, Args, Output>
where
    F: Fn(Args) -> Output + Send + Sync + 'static,
{
    fn from(op: F) -> Self {
        Self::new(op)
    }
}

impl<F, Args, Output> RequestHandler for FnRequestHandler<F, Args, Output>
where
    F: Fn(Args) -> Output + Send + Sync + 'static,
    Args: Clone + Send + 'static,
    Output: Default + Send + 'static,
{
    type Args = Args;
    type Output = Output;

    fn handle(&self, args: Self::Args) -> anyhow::Result<Self::Output> {
        Ok((self.op)(args))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn append_str(s_in: String) -> String {
        format!("{}-processed", s_in)
    }

    #[test]
    fn test_from_simple() {
        let append_handler = FnRequestHandler::from(append_str);

        let response = append_handler.handle(String::from("task")).unwrap();

        assert_eq!("task-processed", response);
    }

    #[test]
    fn test_with_move() {
        let suffix = String::from("-done");

        let handler = FnRequestHandler::from(move |s: String| format!("{s}{suffix}"));

        let response = handler.handle(String::from("task")).unwrap();

        assert_eq!("task-done", response);
    }

    #[test]
    fn test_tuple_args() {
        let handler = FnRequestHandler::from(|(a, b): (i64, i64)| a + b);

        assert_eq!(handler.handle((2, 3)).unwrap(), 5);
    }
}
