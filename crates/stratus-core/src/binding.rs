use crate::controller::Controller;
use crate::screen::Screen;

/// Errors from establishing a view binding.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The controller's effect stream was already claimed by an earlier
    /// binding. Effects must be subscribed exactly once per controller
    /// instance — re-subscribing on re-render would risk duplicating
    /// in-flight effects.
    #[error("effects already bound for this controller")]
    EffectsAlreadyBound,
}

/// Drive a rendering layer from a controller until the controller is
/// destroyed.
///
/// On entry the current state is rendered once and the optional
/// `initial_intent` is dispatched exactly once — never again on re-render.
/// From then on, every observed state change triggers `render` (latest wins;
/// `render` must be idempotent given the same state) and every effect is
/// handed to `on_effect` exactly once.
///
/// The effect stream is claimed when the binding is established; a second
/// `bind` on the same controller fails with
/// [`BindError::EffectsAlreadyBound`].
///
/// # Example
///
/// ```rust,ignore
/// use stratus_core::bind;
///
/// bind(
///     &controller,
///     Some(WeatherIntent::Load(home)),
///     |state| draw(state),
///     |effect| match effect {
///         WeatherEffect::ShowError(msg) => toast(msg),
///         WeatherEffect::NavigateToSettings => nav.push(Route::Settings),
///     },
/// )
/// .await?;
/// ```
pub async fn bind<SC, R, H>(
    controller: &Controller<SC>,
    initial_intent: Option<SC::Intent>,
    mut render: R,
    mut on_effect: H,
) -> Result<(), BindError>
where
    SC: Screen,
    R: FnMut(&SC::State),
    H: FnMut(SC::Effect),
{
    let mut effects = controller
        .effects()
        .ok_or(BindError::EffectsAlreadyBound)?;
    let mut state = controller.observe();

    let snapshot = state.borrow_and_update().clone();
    render(&snapshot);

    if let Some(intent) = initial_intent {
        controller.dispatch(intent);
    }

    loop {
        tokio::select! {
            biased;

            _ = controller.cancelled() => break,

            changed = state.changed() => match changed {
                Ok(()) => {
                    let snapshot = state.borrow_and_update().clone();
                    render(&snapshot);
                }
                Err(_) => break,
            },

            effect = effects.recv() => match effect {
                Some(effect) => on_effect(effect),
                None => break,
            },
        }
    }

    Ok(())
}
