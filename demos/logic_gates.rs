use perceptron_studio::{ActivationFunction, Perceptron, PerceptronError};

fn main() -> Result<(), PerceptronError> {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];

    // Hand-picked weights: no training involved.
    let gates = [
        ("AND",  vec![1.0, 1.0],   -1.5),
        ("OR",   vec![1.0, 1.0],   -0.5),
        ("NAND", vec![-1.0, -1.0],  1.5),
    ];

    let mut perceptron = Perceptron::default();
    for (name, weights, bias) in gates {
        perceptron.configure(weights, bias, "heaviside")?;
        let outputs = perceptron.evaluate(&inputs)?;
        println!("{name}");
        for (input, output) in inputs.iter().zip(outputs.iter()) {
            println!("  {:?} -> {}", input, output);
        }
    }

    // Same AND weights through a sigmoid: the step becomes a soft threshold.
    let soft = Perceptron::new(vec![4.0, 4.0], -6.0, ActivationFunction::Sigmoid);
    println!("AND (sigmoid)");
    for (input, output) in inputs.iter().zip(soft.evaluate(&inputs)?) {
        println!("  {:?} -> {:.4}", input, output);
    }
    Ok(())
}
