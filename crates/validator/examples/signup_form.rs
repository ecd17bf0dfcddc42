//! Signup form example for inputguard
//!
//! Simulates a small form: submit with errors, watch the tooltip appear,
//! type a fix, and submit again.

use inputguard::prelude::*;

#[derive(Debug, Default)]
struct ConsoleViewport;

impl Viewport for ConsoleViewport {
    fn scroll_to(&mut self, field: &FieldRef, extra_offset: i32) {
        let plan = field
            .bounds
            .map(|bounds| ScrollPlan::new(0.0, bounds.y, extra_offset));
        println!("  ↳ scroll to {field} ({plan:?})");
    }

    fn focus(&mut self, field: &FieldRef) {
        println!("  ↳ focus {field}");
    }
}

struct SignupForm {
    first_name: InputElement,
    email: InputElement,
    age: InputElement,
    messages: FormMessages,
}

impl SignupForm {
    fn new() -> Self {
        let mut messages = FormMessages::new();
        messages.insert(
            "firstName".into(),
            MessageOverrides::new().required("First name must be specified"),
        );
        messages.insert(
            "age".into(),
            MessageOverrides::new().type_mismatch("Age is a whole number"),
        );

        Self {
            first_name: InputElement::new("firstName")
                .with_name("First name")
                .required()
                .with_bounds(Rect::new(20.0, 480.0, 300.0, 34.0)),
            email: InputElement::new("email").with_type("email"),
            age: InputElement::new("age").with_type("number").min("18").max("99"),
            messages,
        }
    }

    fn scope(&self) -> [FieldId; 3] {
        [
            self.first_name.id().clone(),
            self.email.id().clone(),
            self.age.id().clone(),
        ]
    }

    fn submit(&self, session: &mut ValidationController) -> Result<bool, Error> {
        let fields: [&dyn FieldElement; 3] = [&self.first_name, &self.email, &self.age];
        session.submit(&self.scope(), |validator| {
            validator.validate_form(fields, &self.messages)
        })
    }
}

fn report(session: &ValidationController, outcome: bool) {
    if outcome {
        println!("✓ OK\n");
        return;
    }
    for field in session.errored_fields() {
        let text = session.adapter().text(field).unwrap_or_default();
        println!("✗ {field}: {text}\n");
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = ValidatorConfig::default().with_range_comparison(RangeComparison::Numeric);
    let mut session = ValidationController::with_config(config, FloatingTooltips::new())
        .with_viewport(ConsoleViewport);
    let mut form = SignupForm::new();

    println!("Submitting an empty form");
    let outcome = form.submit(&mut session)?;
    report(&session, outcome);

    println!("Typing a first name");
    form.first_name.set_value("Ann");
    session.dispatch(&FieldEvent::key_up(form.first_name.id(), form.first_name.value()));
    println!("  errored fields left: {}\n", session.errored_fields().count());

    println!("Submitting with a bad email");
    form.email.set_value("ann@example");
    let outcome = form.submit(&mut session)?;
    report(&session, outcome);

    println!("Submitting with an age below the minimum");
    form.email.set_value("ann@example.com");
    form.age.set_value("9");
    let outcome = form.submit(&mut session)?;
    report(&session, outcome);

    println!("Submitting a valid form");
    form.age.set_value("42");
    let outcome = form.submit(&mut session)?;
    report(&session, outcome);

    Ok(())
}
